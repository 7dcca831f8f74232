//! # Pass Enumerations
//!
//! Closed value sets used by pass descriptors. Wire names follow the
//! `PK...` constants understood by pass viewers.

use serde::{Deserialize, Serialize};

use pkpass_core::ValidationError;

/// Barcode symbology.
///
/// Parsing goes through [`BarcodeFormat::parse`]. Deserializing a bare
/// `Barcode` with an unknown format gives a `serde_json::Error`;
/// `PassDescriptor::from_json` checks the name first and reports
/// `ValidationError::InvalidBarcodeFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum BarcodeFormat {
    /// QR code.
    #[serde(rename = "PKBarcodeFormatQR")]
    Qr,
    /// PDF417.
    #[serde(rename = "PKBarcodeFormatPDF417")]
    Pdf417,
    /// Aztec.
    #[serde(rename = "PKBarcodeFormatAztec")]
    Aztec,
}

impl BarcodeFormat {
    /// Wire name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qr => "PKBarcodeFormatQR",
            Self::Pdf417 => "PKBarcodeFormatPDF417",
            Self::Aztec => "PKBarcodeFormatAztec",
        }
    }

    /// Parse a wire name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidBarcodeFormat` for anything other
    /// than the three recognized names.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "PKBarcodeFormatQR" => Ok(Self::Qr),
            "PKBarcodeFormatPDF417" => Ok(Self::Pdf417),
            "PKBarcodeFormatAztec" => Ok(Self::Aztec),
            other => Err(ValidationError::InvalidBarcodeFormat(other.to_string())),
        }
    }
}

impl TryFrom<String> for BarcodeFormat {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl std::str::FromStr for BarcodeFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data detectors applied to a back field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataDetector {
    /// Phone numbers.
    #[serde(rename = "PKDataDetectorTypePhoneNumber")]
    PhoneNumber,
    /// URLs.
    #[serde(rename = "PKDataDetectorTypeLink")]
    Link,
    /// Street addresses.
    #[serde(rename = "PKDataDetectorTypeAddress")]
    Address,
    /// Calendar events.
    #[serde(rename = "PKDataDetectorTypeCalendarEvent")]
    CalendarEvent,
}

/// Horizontal alignment of a field's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextAlignment {
    /// Locale-dependent alignment.
    #[serde(rename = "PKTextAlignmentNatural")]
    Natural,
    /// Left aligned.
    #[serde(rename = "PKTextAlignmentLeft")]
    Left,
    /// Centered.
    #[serde(rename = "PKTextAlignmentCenter")]
    Center,
    /// Right aligned.
    #[serde(rename = "PKTextAlignmentRight")]
    Right,
}

/// Date or time display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateStyle {
    /// Not displayed.
    #[serde(rename = "PKDateStyleNone")]
    None,
    /// Short style.
    #[serde(rename = "PKDateStyleShort")]
    Short,
    /// Medium style.
    #[serde(rename = "PKDateStyleMedium")]
    Medium,
    /// Long style.
    #[serde(rename = "PKDateStyleLong")]
    Long,
    /// Full style.
    #[serde(rename = "PKDateStyleFull")]
    Full,
}

/// Mode of transport for boarding passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitType {
    /// Air travel.
    #[serde(rename = "PKTransitTypeAir")]
    Air,
    /// Boat or ferry.
    #[serde(rename = "PKTransitTypeBoat")]
    Boat,
    /// Bus.
    #[serde(rename = "PKTransitTypeBus")]
    Bus,
    /// Any other transport.
    #[serde(rename = "PKTransitTypeGeneric")]
    Generic,
    /// Train.
    #[serde(rename = "PKTransitTypeTrain")]
    Train,
}

/// Number display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberStyle {
    /// Decimal.
    #[serde(rename = "PKNumberStyleDecimal")]
    Decimal,
    /// Percentage.
    #[serde(rename = "PKNumberStylePercent")]
    Percent,
    /// Scientific notation.
    #[serde(rename = "PKNumberStyleScientific")]
    Scientific,
    /// Spelled out in words.
    #[serde(rename = "PKNumberStyleSpellOut")]
    SpellOut,
}
