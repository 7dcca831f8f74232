//! # Field
//!
//! A single labelled value rendered in one region of the pass.
//!
//! ## Styling Rules
//!
//! A field is styled either as a date (`dateStyle`, `timeStyle`,
//! `ignoresTimeZone`, `isRelative`) or as a number (`currencyCode` or
//! `numberStyle`), never both. Number styling additionally requires a
//! numeric value, and `currencyCode` and `numberStyle` exclude each other.

use serde::{Deserialize, Serialize};

use pkpass_core::{Timestamp, ValidationError};

use crate::styles::{DataDetector, DateStyle, NumberStyle, TextAlignment};

/// Placeholder replaced by the new value in a change message.
pub const CHANGE_MESSAGE_PLACEHOLDER: &str = "%@";

/// The primitive value of a field.
///
/// Strings in canonical timestamp form deserialize as [`FieldValue::Date`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A number.
    Number(serde_json::Number),
    /// A date.
    Date(Timestamp),
    /// Free text.
    Text(String),
}

impl FieldValue {
    /// Whether the value carries no content.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Whether the value is numeric.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Timestamp> for FieldValue {
    fn from(value: Timestamp) -> Self {
        Self::Date(value)
    }
}

/// Standard field dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Key, unique within its collection.
    pub key: String,
    /// Label text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Value.
    pub value: FieldValue,
    /// Rich-text variant of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributed_value: Option<FieldValue>,
    /// Alignment of the contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<TextAlignment>,
    /// Update alert text; must contain `%@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_message: Option<String>,
    /// Data detectors applied to the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_detector_types: Option<Vec<DataDetector>>,

    /// Date style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_style: Option<DateStyle>,
    /// Time style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_style: Option<DateStyle>,
    /// Show the date in its own time zone rather than the viewer's.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignores_time_zone: bool,
    /// Show the date relative to now.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_relative: bool,

    /// ISO 4217 currency code for a numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// Number style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_style: Option<NumberStyle>,
}

impl Field {
    /// Create an unstyled field.
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            label: None,
            value: value.into(),
            attributed_value: None,
            text_alignment: None,
            change_message: None,
            data_detector_types: None,
            date_style: None,
            time_style: None,
            ignores_time_zone: false,
            is_relative: false,
            currency_code: None,
            number_style: None,
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the change message.
    pub fn with_change_message(mut self, message: impl Into<String>) -> Self {
        self.change_message = Some(message.into());
        self
    }

    /// Style the value as a date and time.
    pub fn with_date_style(mut self, date_style: DateStyle, time_style: DateStyle) -> Self {
        self.date_style = Some(date_style);
        self.time_style = Some(time_style);
        self
    }

    /// Style the value as a number.
    pub fn with_number_style(mut self, style: NumberStyle) -> Self {
        self.number_style = Some(style);
        self
    }

    /// Style the value as an amount of money.
    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    fn has_date_style(&self) -> bool {
        self.date_style.is_some() || self.time_style.is_some() || self.ignores_time_zone || self.is_relative
    }

    fn has_number_style(&self) -> bool {
        self.currency_code.is_some() || self.number_style.is_some()
    }

    /// Check the field rules.
    ///
    /// # Errors
    ///
    /// - `MissingFieldKey` if the key is empty.
    /// - `MissingFieldValue` if the value is empty text.
    /// - `InvalidChangeMessage` if a change message lacks `%@`.
    /// - `ConflictingFieldStyle` if date and number styling are mixed, or
    ///   both a currency code and a number style are set.
    /// - `NumberStyleOnNonNumeric` if number styling targets a non-number.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key.is_empty() {
            return Err(ValidationError::MissingFieldKey);
        }
        if self.value.is_empty() {
            return Err(ValidationError::MissingFieldValue(self.key.clone()));
        }
        if let Some(message) = &self.change_message {
            if !message.contains(CHANGE_MESSAGE_PLACEHOLDER) {
                return Err(ValidationError::InvalidChangeMessage(self.key.clone()));
            }
        }
        if self.has_date_style() && self.has_number_style() {
            return Err(ValidationError::ConflictingFieldStyle(self.key.clone()));
        }
        if self.currency_code.is_some() && self.number_style.is_some() {
            return Err(ValidationError::ConflictingFieldStyle(self.key.clone()));
        }
        if self.has_number_style() && !self.value.is_number() {
            return Err(ValidationError::NumberStyleOnNonNumeric(self.key.clone()));
        }
        Ok(())
    }
}
