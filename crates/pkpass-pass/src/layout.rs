//! # Field Layout and Pass Style
//!
//! A [`FieldLayout`] groups fields into the regions of the pass face. A
//! [`FieldCollection`] keeps its fields in insertion order and refuses a
//! second field with the same key, so rendering order is explicit and never
//! depends on map iteration.
//!
//! [`PassStyle`] holds exactly one layout under one of five style keys.

use serde::{Deserialize, Serialize};

use pkpass_core::ValidationError;

use crate::field::Field;
use crate::styles::TransitType;

/// An ordered set of fields with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Field>", into = "Vec<Field>")]
pub struct FieldCollection {
    fields: Vec<Field>,
}

impl FieldCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    ///
    /// # Errors
    ///
    /// `ValidationError::DuplicateFieldKey` if a field with the same key is
    /// already present. The collection is left unchanged.
    pub fn insert(&mut self, field: Field) -> Result<(), ValidationError> {
        if self.get(&field.key).is_some() {
            return Err(ValidationError::DuplicateFieldKey(field.key));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate every field, stopping at the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.fields.iter().try_for_each(Field::validate)
    }
}

impl TryFrom<Vec<Field>> for FieldCollection {
    type Error = ValidationError;

    fn try_from(fields: Vec<Field>) -> Result<Self, Self::Error> {
        let mut collection = Self::new();
        for field in fields {
            collection.insert(field)?;
        }
        Ok(collection)
    }
}

impl From<FieldCollection> for Vec<Field> {
    fn from(collection: FieldCollection) -> Self {
        collection.fields
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Keys and values for the fields displayed on a pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldLayout {
    /// Mode of transport. Used by boarding passes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_type: Option<TransitType>,
    #[serde(default, skip_serializing_if = "FieldCollection::is_empty")]
    pub header_fields: FieldCollection,
    #[serde(default, skip_serializing_if = "FieldCollection::is_empty")]
    pub primary_fields: FieldCollection,
    #[serde(default, skip_serializing_if = "FieldCollection::is_empty")]
    pub secondary_fields: FieldCollection,
    #[serde(default, skip_serializing_if = "FieldCollection::is_empty")]
    pub auxiliary_fields: FieldCollection,
    #[serde(default, skip_serializing_if = "FieldCollection::is_empty")]
    pub back_fields: FieldCollection,
}

impl FieldLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the collections in header, primary, secondary, auxiliary,
    /// back order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.header_fields.validate()?;
        self.primary_fields.validate()?;
        self.secondary_fields.validate()?;
        self.auxiliary_fields.validate()?;
        self.back_fields.validate()
    }
}

/// The style of a pass and its field layout.
///
/// Serialized as a single key (`boardingPass`, `coupon`, `eventTicket`,
/// `generic` or `storeCard`) holding the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassStyle {
    BoardingPass(FieldLayout),
    Coupon(FieldLayout),
    EventTicket(FieldLayout),
    Generic(FieldLayout),
    StoreCard(FieldLayout),
}

impl PassStyle {
    /// Wire keys of all styles.
    pub const KEYS: [&'static str; 5] =
        ["boardingPass", "coupon", "eventTicket", "generic", "storeCard"];

    /// Wire key of this style.
    pub fn key(&self) -> &'static str {
        match self {
            Self::BoardingPass(_) => "boardingPass",
            Self::Coupon(_) => "coupon",
            Self::EventTicket(_) => "eventTicket",
            Self::Generic(_) => "generic",
            Self::StoreCard(_) => "storeCard",
        }
    }

    pub fn layout(&self) -> &FieldLayout {
        match self {
            Self::BoardingPass(l)
            | Self::Coupon(l)
            | Self::EventTicket(l)
            | Self::Generic(l)
            | Self::StoreCard(l) => l,
        }
    }

    pub fn layout_mut(&mut self) -> &mut FieldLayout {
        match self {
            Self::BoardingPass(l)
            | Self::Coupon(l)
            | Self::EventTicket(l)
            | Self::Generic(l)
            | Self::StoreCard(l) => l,
        }
    }
}

impl Default for PassStyle {
    fn default() -> Self {
        Self::Generic(FieldLayout::default())
    }
}
