//! Error types shared by the fieldwatch model and engine.
//!
//! None of these reach the caller of a change-detection operation: the
//! engine logs them and degrades to a conservative boolean. They are
//! public so that callers who want to tell configuration drift apart from
//! a legitimately empty field can use the `try_*` entry points.

/// Why a field could not be read from an entity snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The field name was empty or whitespace.
    #[error("field name is blank")]
    BlankFieldName,

    /// There was no entity to read from.
    #[error("no entity to read field '{field}' from")]
    NoEntity { field: String },

    /// The property exists but holds a child collection, not a value.
    #[error("field '{field}' is a collection, not a scalar")]
    NotAScalar { field: String },

    /// A custom field was requested but the entity has no custom container.
    #[error("entity has no custom fields; cannot read '{field_id}'")]
    NoCustomFields { field_id: String },

    /// The catalog could not map the custom field id to a column.
    #[error("custom field '{field_id}' is not resolvable by the catalog")]
    UnresolvedCustomField { field_id: String },
}

/// A criterion literal could not be coerced into the runtime type of the
/// value it is compared against.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    /// The literal does not parse as the target type.
    #[error("cannot convert '{literal}' to {target}")]
    Unparsable {
        literal: String,
        target: &'static str,
    },

    /// Literals cannot be converted into this kind of value at all.
    #[error("cannot convert a literal to {target}")]
    Unsupported { target: &'static str },
}

/// A string is not a well-formed custom field id (`cust<Kind><N>`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomFieldIdError {
    #[error("'{0}' does not start with 'cust'")]
    MissingPrefix(String),

    #[error("'{0}' does not name a known custom column kind")]
    UnknownKind(String),

    #[error("'{0}' has no valid column number")]
    InvalidSlot(String),
}

/// A declared field type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type '{0}'")]
pub struct UnknownFieldType(pub String);

/// Detector configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration source is not valid TOML for this schema.
    #[error("invalid detector config: {0}")]
    Parse(String),

    /// A value parsed but is out of range.
    #[error("invalid detector config value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}
