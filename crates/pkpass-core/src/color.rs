//! # Color Codec
//!
//! `Color` is an 8-bit RGB triple whose only textual form is the CSS-style
//! literal `rgb(R, G, B)`: decimal components without leading zeros,
//! separated by a comma and a single space.
//!
//! Parsing is strict. `rgb(0,0,0)`, `rgb(00, 0, 0)`, `rgb(256, 0, 0)`,
//! `#000000` and surrounding whitespace are all rejected, so that
//! `Color::parse(&c.to_string()) == Ok(c)` holds for every color and no
//! other string parses.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse the exact `rgb(R, G, B)` form.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidColor` for any other shape.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        let invalid = || CodecError::InvalidColor(s.to_string());

        let inner = s
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let mut parts = inner.split(", ");
        let r = parts.next().and_then(parse_channel).ok_or_else(invalid)?;
        let g = parts.next().and_then(parse_channel).ok_or_else(invalid)?;
        let b = parts.next().and_then(parse_channel).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { r, g, b })
    }
}

/// Parse one decimal channel: ASCII digits only, no sign, no leading zero
/// unless the value is exactly `0`.
fn parse_channel(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Color {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Color::new(255, 0, 10).to_string(), "rgb(255, 0, 10)");
        assert_eq!(Color::default().to_string(), "rgb(0, 0, 0)");
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(Color::parse("rgb(60, 65, 76)"), Ok(Color::new(60, 65, 76)));
        assert_eq!(Color::parse("rgb(0, 0, 0)"), Ok(Color::new(0, 0, 0)));
        assert_eq!(
            Color::parse("rgb(255, 255, 255)"),
            Ok(Color::new(255, 255, 255))
        );
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for bad in [
            "",
            "rgb(0,0,0)",
            "rgb(0, 0,0)",
            "rgb( 0, 0, 0)",
            "rgb(0, 0, 0) ",
            " rgb(0, 0, 0)",
            "RGB(0, 0, 0)",
            "rgba(0, 0, 0, 1)",
            "rgb(0, 0)",
            "rgb(0, 0, 0, 0)",
            "rgb(256, 0, 0)",
            "rgb(-1, 0, 0)",
            "rgb(+1, 0, 0)",
            "rgb(01, 0, 0)",
            "rgb(000, 0, 0)",
            "rgb(1.0, 0, 0)",
            "#000000",
            "rgb(0, 0, 0",
        ] {
            assert!(Color::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_from_str() {
        let c: Color = "rgb(1, 2, 3)".parse().unwrap();
        assert_eq!(c, Color::new(1, 2, 3));
    }

    #[test]
    fn test_serde_as_string() {
        let c = Color::new(12, 34, 56);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"rgb(12, 34, 56)\"");
        let parsed: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn test_serde_rejects_non_canonical() {
        assert!(serde_json::from_str::<Color>("\"rgb(12,34,56)\"").is_err());
        assert!(serde_json::from_str::<Color>("[12, 34, 56]").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn color_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let c = Color::new(r, g, b);
            prop_assert_eq!(Color::parse(&c.to_string()), Ok(c));
        }

        #[test]
        fn arbitrary_text_never_panics(s in ".{0,24}") {
            let _ = Color::parse(&s);
        }

        #[test]
        fn parsed_colors_format_back_identically(s in "rgb\\([0-9]{1,3}, [0-9]{1,3}, [0-9]{1,3}\\)") {
            if let Ok(c) = Color::parse(&s) {
                prop_assert_eq!(c.to_string(), s);
            }
        }
    }
}
