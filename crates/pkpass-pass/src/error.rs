//! # Pass Errors

use thiserror::Error;

use pkpass_core::{CanonicalizationError, ValidationError};

/// Error producing or reading a pass descriptor.
#[derive(Error, Debug)]
pub enum PassError {
    /// The descriptor breaks a content rule.
    #[error("invalid pass descriptor: {0}")]
    Validation(#[from] ValidationError),

    /// The descriptor could not be rendered to canonical bytes.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Input is not a well-formed descriptor document.
    #[error("malformed pass descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document does not hold exactly one style key.
    #[error("pass descriptor must contain exactly one style key, found {0}")]
    StyleCount(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_wraps_message() {
        let err = PassError::from(ValidationError::TokenTooShort(15));
        assert!(err.to_string().contains("16 characters"));
        assert!(matches!(err, PassError::Validation(ValidationError::TokenTooShort(15))));
    }

    #[test]
    fn style_count_display() {
        assert!(PassError::StyleCount(2).to_string().contains("found 2"));
    }
}
