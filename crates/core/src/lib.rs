//! fieldwatch-core: snapshot model for entity change detection.
//!
//! Provides the types the change-detection engine reads:
//!
//! - [`Value`] -- tagged runtime value of a field
//! - [`Entity`] -- a snapshot with fixed fields, custom fields, and child
//!   collections
//! - [`FieldType`] / [`FieldDefinition`] -- declared types supplied by the
//!   caller per evaluation
//! - [`CustomColumn`] / [`CustomFieldCatalog`] -- custom field ids and how
//!   they resolve to storage
//! - [`Criterion`] / [`ChangeCriteria`] -- trigger rule conditions
//!
//! Everything here is an immutable input; nothing holds state between
//! evaluations.

pub mod criteria;
pub mod custom;
pub mod entity;
pub mod error;
pub mod field;
pub mod value;

// ── Convenience re-exports ────────────────────────────────────────────

pub use criteria::{ChangeCriteria, Criterion, ANY_TOKEN, EMPTY_TOKEN};
pub use custom::{
    is_custom_field_id, parse_custom_field_id, ConventionCatalog, CustomColumn,
    CustomFieldCatalog, CustomFieldKind, CustomFields, DefinitionCatalog,
};
pub use entity::{Entity, Property};
pub use error::{AccessError, CoercionError, ConfigError, CustomFieldIdError, UnknownFieldType};
pub use field::{FieldDefinition, FieldType};
pub use value::{AttachmentRef, CodelistValue, HclValue, Value};
