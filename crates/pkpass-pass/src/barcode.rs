//! # Barcode
//!
//! The machine-readable payload shown on the front of a pass.

use serde::{Deserialize, Serialize};

use pkpass_core::ValidationError;

use crate::styles::BarcodeFormat;

/// Encoding assumed when a barcode does not name one.
pub const DEFAULT_MESSAGE_ENCODING: &str = "iso-8859-1";

/// Information about a pass's barcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    /// Barcode symbology.
    pub format: BarcodeFormat,
    /// Payload encoded in the barcode.
    pub message: String,
    /// Text encoding used to turn `message` into bytes. Blank means
    /// [`DEFAULT_MESSAGE_ENCODING`].
    #[serde(default)]
    pub message_encoding: String,
    /// Human-readable text shown near the barcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl Barcode {
    /// Create a barcode with the default message encoding.
    pub fn new(format: BarcodeFormat, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
            message_encoding: String::new(),
            alt_text: None,
        }
    }

    /// Set the alternative text.
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    /// Check the barcode rules.
    ///
    /// # Errors
    ///
    /// `ValidationError::MissingBarcodeMessage` if the message is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.message.is_empty() {
            return Err(ValidationError::MissingBarcodeMessage);
        }
        Ok(())
    }

    /// Copy with a blank message encoding replaced by the default.
    pub(crate) fn normalized(&self) -> Self {
        let mut out = self.clone();
        if out.message_encoding.trim().is_empty() {
            out.message_encoding = DEFAULT_MESSAGE_ENCODING.to_string();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_rejected() {
        let b = Barcode::new(BarcodeFormat::Qr, "");
        assert_eq!(b.validate(), Err(ValidationError::MissingBarcodeMessage));
    }

    #[test]
    fn blank_encoding_defaults() {
        let b = Barcode::new(BarcodeFormat::Pdf417, "123");
        assert_eq!(b.normalized().message_encoding, DEFAULT_MESSAGE_ENCODING);
        // The caller's value is untouched.
        assert!(b.message_encoding.is_empty());
    }

    #[test]
    fn explicit_encoding_kept() {
        let mut b = Barcode::new(BarcodeFormat::Aztec, "123");
        b.message_encoding = "utf-8".to_string();
        assert_eq!(b.normalized().message_encoding, "utf-8");
    }

    #[test]
    fn unknown_format_names_the_rule() {
        assert!(matches!(
            BarcodeFormat::parse("PKBarcodeFormatCode128"),
            Err(ValidationError::InvalidBarcodeFormat(f)) if f == "PKBarcodeFormatCode128"
        ));
        let json = r#"{"format":"PKBarcodeFormatCode128","message":"x"}"#;
        assert!(serde_json::from_str::<Barcode>(json).is_err());
    }

    #[test]
    fn wire_shape() {
        let b = Barcode::new(BarcodeFormat::Qr, "ticket-1").with_alt_text("T1").normalized();
        let v = serde_json::to_value(&b).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "format": "PKBarcodeFormatQR",
                "message": "ticket-1",
                "messageEncoding": "iso-8859-1",
                "altText": "T1"
            })
        );
    }
}
