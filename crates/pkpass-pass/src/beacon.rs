//! # Beacon
//!
//! A Bluetooth Low Energy beacon near which the pass becomes relevant.

use serde::{Deserialize, Serialize};

use pkpass_core::ValidationError;

/// Information about a location beacon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beacon {
    /// Proximity UUID of the beacon.
    #[serde(rename = "proximityUUID")]
    pub proximity_uuid: String,
    /// Major identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<u16>,
    /// Minor identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<u16>,
    /// Lock-screen text shown when the beacon is in range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_text: Option<String>,
}

impl Beacon {
    /// Create a beacon with only a proximity UUID.
    pub fn new(proximity_uuid: impl Into<String>) -> Self {
        Self {
            proximity_uuid: proximity_uuid.into(),
            major: None,
            minor: None,
            relevant_text: None,
        }
    }

    /// Check the beacon rules.
    ///
    /// # Errors
    ///
    /// `ValidationError::MissingBeaconId` if the proximity UUID is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.proximity_uuid.is_empty() {
            return Err(ValidationError::MissingBeaconId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_uuid_rejected() {
        assert_eq!(Beacon::new("").validate(), Err(ValidationError::MissingBeaconId));
        assert!(Beacon::new("E2C56DB5-DFFB-48D2-B060-D0F5A71096E0").validate().is_ok());
    }

    #[test]
    fn wire_names() {
        let mut b = Beacon::new("E2C56DB5-DFFB-48D2-B060-D0F5A71096E0");
        b.major = Some(7);
        let v = serde_json::to_value(&b).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "proximityUUID": "E2C56DB5-DFFB-48D2-B060-D0F5A71096E0",
                "major": 7
            })
        );
    }
}
