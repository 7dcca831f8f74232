//! # Error Types
//!
//! Defines the error types shared by the pass crates. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every descriptor rule has its own `ValidationError` variant so callers
//!   can match on the rule that failed, not on message text.
//! - Codec errors carry the rejected input verbatim.
//! - IO and signing failures are not represented here; they belong to the
//!   crates that talk to streams and keys.

use thiserror::Error;

/// A descriptor rule violation, reported at serialization time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required top-level string is empty.
    #[error("required field {0} is empty")]
    MissingRequiredField(&'static str),

    /// A launch URL was given without any associated store identifiers.
    #[error("appLaunchURL is set but associatedStoreIdentifiers is empty")]
    InconsistentAssociatedApp,

    /// The web service authentication token is shorter than 16 characters.
    #[error("authenticationToken must be 16 characters or longer, got {0}")]
    TokenTooShort(usize),

    /// The web service URL does not use HTTPS.
    #[error("webServiceURL must use the https scheme: {0:?}")]
    InsecureServiceUrl(String),

    /// The barcode format is not one of QR, PDF417 or Aztec.
    #[error("unsupported barcode format {0:?}; expected PKBarcodeFormatQR, PKBarcodeFormatPDF417 or PKBarcodeFormatAztec")]
    InvalidBarcodeFormat(String),

    /// The barcode message is empty.
    #[error("barcode message must be set")]
    MissingBarcodeMessage,

    /// A beacon has an empty proximity UUID.
    #[error("beacon proximityUUID must be set")]
    MissingBeaconId,

    /// A field has an empty key.
    #[error("field key must be set")]
    MissingFieldKey,

    /// A field has an empty value.
    #[error("field {0:?} has an empty value")]
    MissingFieldValue(String),

    /// Two fields in the same collection share a key.
    #[error("field key {0:?} is used more than once in the same collection")]
    DuplicateFieldKey(String),

    /// A field mixes date styling with number styling, or sets both
    /// a currency code and a number style.
    #[error("field {0:?} combines mutually exclusive date and number styles")]
    ConflictingFieldStyle(String),

    /// A number style or currency code was set on a non-numeric value.
    #[error("field {0:?} has number styling but a non-numeric value")]
    NumberStyleOnNonNumeric(String),

    /// A change message lacks the `%@` placeholder.
    #[error("field {0:?} changeMessage must contain the %@ placeholder")]
    InvalidChangeMessage(String),
}

/// Error while parsing a value from its canonical textual form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input is not of the form `rgb(R, G, B)`.
    #[error("invalid color {0:?}: expected rgb(R, G, B) with decimal components 0-255")]
    InvalidColor(String),

    /// Input is not of the form `YYYY-MM-DDTHH:MM±HH:MM`.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// Writing the serialized output failed.
    #[error("serialization output failed: {0}")]
    Output(#[from] std::io::Error),
}
