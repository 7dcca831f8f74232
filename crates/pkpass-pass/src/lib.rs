//! # pkpass-pass — Pass Descriptor Model
//!
//! Record types for the content of `pass.json` and the rules they must
//! satisfy before they are written.
//!
//! ## Structure
//!
//! - [`PassDescriptor`]: identity, relevance, appearance and web service
//!   data, plus exactly one [`PassStyle`].
//! - [`PassStyle`]: one of five styles, each carrying a [`FieldLayout`].
//! - [`FieldCollection`]: ordered fields with unique keys.
//! - [`Field`], [`Barcode`], [`Beacon`], [`Location`] and the `PK...`
//!   enumerations in [`styles`].
//!
//! ## Validation
//!
//! Construction never fails. [`PassDescriptor::validate`] and
//! [`PassDescriptor::to_canonical_bytes`] check the rules and report the
//! first violation as a [`ValidationError`](pkpass_core::ValidationError).

pub mod barcode;
pub mod beacon;
pub mod error;
pub mod field;
pub mod layout;
pub mod location;
pub mod pass;
pub mod styles;

pub use barcode::Barcode;
pub use beacon::Beacon;
pub use error::PassError;
pub use field::{Field, FieldValue};
pub use layout::{FieldCollection, FieldLayout, PassStyle};
pub use location::Location;
pub use pass::PassDescriptor;
pub use styles::{BarcodeFormat, DataDetector, DateStyle, NumberStyle, TextAlignment, TransitType};
