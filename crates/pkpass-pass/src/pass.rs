//! # Pass Descriptor
//!
//! The top-level record written to `pass.json`.
//!
//! Validation happens when the descriptor is turned into bytes, never when
//! it is constructed. Rules are checked in a fixed order and the first
//! failure is reported:
//!
//! 1. Required strings: `description`, `organizationName`,
//!    `passTypeIdentifier`, `serialNumber`, `teamIdentifier`.
//! 2. `appLaunchURL` needs at least one associated store identifier.
//! 3. `authenticationToken`, when present, has at least 16 characters.
//! 4. `webServiceURL`, when present, uses `https`.
//! 5. Barcode, then beacons, then fields.
//!
//! The serialized `formatVersion` is always 1 and a blank barcode message
//! encoding is filled in. Neither normalization touches the caller's value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use pkpass_core::{CanonicalBytes, Color, ContentDigest, DigestAlgorithm, Timestamp, ValidationError};

use crate::barcode::Barcode;
use crate::beacon::Beacon;
use crate::error::PassError;
use crate::layout::PassStyle;
use crate::location::Location;
use crate::styles::BarcodeFormat;

/// The only supported `formatVersion`.
pub const FORMAT_VERSION: u32 = 1;

/// Minimum length of a web service authentication token, in characters.
pub const MIN_TOKEN_LEN: usize = 16;

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

/// A pass descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassDescriptor {
    // Identity.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    pub pass_type_identifier: String,
    pub serial_number: String,
    pub team_identifier: String,
    pub organization_name: String,
    pub description: String,

    // Associated app.
    #[serde(
        rename = "appLaunchURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub app_launch_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associated_store_identifiers: Vec<u64>,

    /// Opaque companion data, passed through uninterpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<Map<String, Value>>,

    // Expiration and relevance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub voided: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub beacons: Vec<Beacon>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    /// Relevance radius in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_date: Option<Timestamp>,

    // Visual appearance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<Barcode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping_identifier: Option<String>,

    /// Style key and field layout.
    #[serde(flatten)]
    pub style: PassStyle,

    // Web service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_token: Option<String>,
    #[serde(
        rename = "webServiceURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub web_service_url: Option<String>,
}

impl PassDescriptor {
    /// Create a descriptor with the required identity strings and a style.
    pub fn new(
        pass_type_identifier: impl Into<String>,
        serial_number: impl Into<String>,
        team_identifier: impl Into<String>,
        organization_name: impl Into<String>,
        description: impl Into<String>,
        style: PassStyle,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            pass_type_identifier: pass_type_identifier.into(),
            serial_number: serial_number.into(),
            team_identifier: team_identifier.into(),
            organization_name: organization_name.into(),
            description: description.into(),
            app_launch_url: None,
            associated_store_identifiers: Vec::new(),
            user_info: None,
            expiration_date: None,
            voided: false,
            beacons: Vec::new(),
            locations: Vec::new(),
            max_distance: None,
            relevant_date: None,
            barcode: None,
            background_color: None,
            foreground_color: None,
            label_color: None,
            logo_text: None,
            grouping_identifier: None,
            style,
            authentication_token: None,
            web_service_url: None,
        }
    }

    /// Check every descriptor rule and report the first violation.
    ///
    /// `formatVersion` is not checked; any value is written as 1.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("description", &self.description),
            ("organizationName", &self.organization_name),
            ("passTypeIdentifier", &self.pass_type_identifier),
            ("serialNumber", &self.serial_number),
            ("teamIdentifier", &self.team_identifier),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(ValidationError::MissingRequiredField(name));
            }
        }

        if self.app_launch_url.is_some() && self.associated_store_identifiers.is_empty() {
            return Err(ValidationError::InconsistentAssociatedApp);
        }

        if let Some(token) = &self.authentication_token {
            let len = token.chars().count();
            if len < MIN_TOKEN_LEN {
                return Err(ValidationError::TokenTooShort(len));
            }
        }

        if let Some(service) = &self.web_service_url {
            let secure = url::Url::parse(service)
                .map(|u| u.scheme() == "https")
                .unwrap_or(false);
            if !secure {
                return Err(ValidationError::InsecureServiceUrl(service.clone()));
            }
        }

        if let Some(barcode) = &self.barcode {
            barcode.validate()?;
        }
        for beacon in &self.beacons {
            beacon.validate()?;
        }
        self.style.layout().validate()
    }

    /// Validate and render the canonical `pass.json` bytes.
    ///
    /// # Errors
    ///
    /// `PassError::Validation` for the first broken rule, or
    /// `PassError::Canonicalization` if rendering fails.
    pub fn to_canonical_bytes(&self) -> Result<CanonicalBytes, PassError> {
        self.validate()?;
        Ok(CanonicalBytes::new(&self.normalized())?)
    }

    /// Digest of the canonical bytes.
    pub fn canonical_digest(&self, algorithm: DigestAlgorithm) -> Result<ContentDigest, PassError> {
        Ok(algorithm.digest_canonical(&self.to_canonical_bytes()?))
    }

    /// Parse a descriptor document.
    ///
    /// Content rules are not checked here; call [`validate`](Self::validate)
    /// or [`to_canonical_bytes`](Self::to_canonical_bytes).
    ///
    /// # Errors
    ///
    /// - `PassError::Parse` for malformed JSON or mistyped values.
    /// - `PassError::StyleCount` unless exactly one style key is present.
    /// - `PassError::Validation` with `InvalidBarcodeFormat` for an
    ///   unrecognized `barcode.format` name.
    pub fn from_json(bytes: &[u8]) -> Result<Self, PassError> {
        let value: Value = serde_json::from_slice(bytes)?;
        let styles = match &value {
            Value::Object(map) => PassStyle::KEYS
                .iter()
                .filter(|k| map.contains_key(**k))
                .count(),
            _ => 0,
        };
        if styles != 1 {
            return Err(PassError::StyleCount(styles));
        }
        if let Some(format) = value
            .get("barcode")
            .and_then(|b| b.get("format"))
            .and_then(Value::as_str)
        {
            BarcodeFormat::parse(format)?;
        }
        Ok(serde_json::from_value(value)?)
    }

    fn normalized(&self) -> Self {
        let mut out = self.clone();
        out.format_version = FORMAT_VERSION;
        out.barcode = self.barcode.as_ref().map(Barcode::normalized);
        out
    }
}
