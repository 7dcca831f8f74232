//! # Signing Error Types
//!
//! Structured errors for key loading and signing. The archive writer
//! propagates these unchanged.

use thiserror::Error;

/// Errors from key loading, signing and signature verification.
#[derive(Error, Debug)]
pub enum SigningError {
    /// Key material is malformed or has the wrong length.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(String),

    /// The signing backend refused or failed to sign.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// I/O error while reading key files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_display() {
        let err = SigningError::InvalidKey("too short".to_string());
        assert!(format!("{err}").contains("too short"));
    }

    #[test]
    fn missing_env_display() {
        let err = SigningError::MissingEnv("PKPASS_SIGNING_KEY".to_string());
        assert!(format!("{err}").contains("PKPASS_SIGNING_KEY"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "key missing");
        let err = SigningError::from(io_err);
        assert!(format!("{err}").contains("key missing"));
    }
}
