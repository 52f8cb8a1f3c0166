//! Custom fields: id grammar, typed column storage, and catalogs.
//!
//! A custom field id has the form `cust<Kind><N>` (for example
//! `custDecimal3`). The kind names the column family the value is stored
//! in and hints its declared type; `N` is the column slot within that
//! family. Values live in a [`CustomFields`] container keyed by
//! [`CustomColumn`].
//!
//! Resolving an id to a column goes through a [`CustomFieldCatalog`] so
//! callers can restrict or remap what the engine is allowed to read.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CustomFieldIdError;
use crate::field::{FieldDefinition, FieldType};
use crate::value::Value;

const CUSTOM_PREFIX: &str = "cust";

// ──────────────────────────────────────────────
// Column kinds
// ──────────────────────────────────────────────

/// Column family of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomFieldKind {
    Text,
    Date,
    Number,
    Decimal,
    Codelist,
    Dropdown,
    Hcl,
    MemoText,
    Checkbox,
    Selection,
}

impl CustomFieldKind {
    pub const ALL: [CustomFieldKind; 10] = [
        CustomFieldKind::Text,
        CustomFieldKind::Date,
        CustomFieldKind::Number,
        CustomFieldKind::Decimal,
        CustomFieldKind::Codelist,
        CustomFieldKind::Dropdown,
        CustomFieldKind::Hcl,
        CustomFieldKind::MemoText,
        CustomFieldKind::Checkbox,
        CustomFieldKind::Selection,
    ];

    /// The segment that appears in field ids (`custMemoText1` -> `MemoText`).
    pub fn id_segment(self) -> &'static str {
        match self {
            CustomFieldKind::Text => "Text",
            CustomFieldKind::Date => "Date",
            CustomFieldKind::Number => "Number",
            CustomFieldKind::Decimal => "Decimal",
            CustomFieldKind::Codelist => "Codelist",
            CustomFieldKind::Dropdown => "Dropdown",
            CustomFieldKind::Hcl => "Hcl",
            CustomFieldKind::MemoText => "MemoText",
            CustomFieldKind::Checkbox => "Checkbox",
            CustomFieldKind::Selection => "Selection",
        }
    }

    /// The field type a column of this kind is declared with.
    pub fn field_type(self) -> FieldType {
        match self {
            CustomFieldKind::Text => FieldType::Text,
            CustomFieldKind::Date => FieldType::Date,
            CustomFieldKind::Number => FieldType::Number,
            CustomFieldKind::Decimal => FieldType::Decimal,
            CustomFieldKind::Codelist => FieldType::Codelist,
            CustomFieldKind::Dropdown => FieldType::Dropdown,
            CustomFieldKind::Hcl => FieldType::HclGroup,
            CustomFieldKind::MemoText => FieldType::MemoText,
            CustomFieldKind::Checkbox => FieldType::Checkbox,
            CustomFieldKind::Selection => FieldType::Selection,
        }
    }
}

// ──────────────────────────────────────────────
// Columns and ids
// ──────────────────────────────────────────────

/// Physical storage key of a custom field: column family plus slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomColumn {
    pub kind: CustomFieldKind,
    pub slot: u32,
}

impl CustomColumn {
    pub fn new(kind: CustomFieldKind, slot: u32) -> Self {
        CustomColumn { kind, slot }
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

/// Renders back to the canonical field id, e.g. `custText1`.
impl fmt::Display for CustomColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", CUSTOM_PREFIX, self.kind.id_segment(), self.slot)
    }
}

impl FromStr for CustomColumn {
    type Err = CustomFieldIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_custom_field_id(s)
    }
}

/// Parse `cust<Kind><N>` into a column.
///
/// The whole string must match: no surrounding whitespace, a kind from
/// [`CustomFieldKind::ALL`] spelled exactly, and one or more ASCII digits.
/// A well-formed id whose slot does not fit a `u32` is still a custom id
/// but has no column.
pub fn parse_custom_field_id(field_id: &str) -> Result<CustomColumn, CustomFieldIdError> {
    let (kind, digits) = split_custom_field_id(field_id)?;
    let slot = digits
        .parse::<u32>()
        .map_err(|_| CustomFieldIdError::InvalidSlot(field_id.to_string()))?;
    Ok(CustomColumn { kind, slot })
}

/// True if `field_id` names a custom field rather than a fixed one.
pub fn is_custom_field_id(field_id: &str) -> bool {
    split_custom_field_id(field_id).is_ok()
}

fn split_custom_field_id(field_id: &str) -> Result<(CustomFieldKind, &str), CustomFieldIdError> {
    let rest = field_id
        .strip_prefix(CUSTOM_PREFIX)
        .ok_or_else(|| CustomFieldIdError::MissingPrefix(field_id.to_string()))?;

    let split = rest
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (segment, digits) = rest.split_at(split);

    let kind = CustomFieldKind::ALL
        .into_iter()
        .find(|k| k.id_segment() == segment)
        .ok_or_else(|| CustomFieldIdError::UnknownKind(field_id.to_string()))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CustomFieldIdError::InvalidSlot(field_id.to_string()));
    }
    Ok((kind, digits))
}

// ──────────────────────────────────────────────
// Storage
// ──────────────────────────────────────────────

/// The custom-field container of one entity snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFields {
    columns: BTreeMap<CustomColumn, Value>,
}

impl CustomFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: CustomColumn, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: CustomColumn, value: impl Into<Value>) {
        self.columns.insert(column, value.into());
    }

    pub fn get(&self, column: &CustomColumn) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CustomColumn, &Value)> {
        self.columns.iter()
    }
}

// ──────────────────────────────────────────────
// Catalogs
// ──────────────────────────────────────────────

/// Maps custom field ids to storage columns.
pub trait CustomFieldCatalog: Send + Sync {
    /// Resolve a field id, or `None` if the catalog does not know it.
    fn resolve(&self, field_id: &str) -> Option<CustomColumn>;
}

/// Resolves any well-formed id by its naming convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionCatalog;

impl CustomFieldCatalog for ConventionCatalog {
    fn resolve(&self, field_id: &str) -> Option<CustomColumn> {
        parse_custom_field_id(field_id).ok()
    }
}

/// Resolves only the custom fields present in a definition list.
///
/// A definition whose declared type disagrees with the column kind its id
/// names is dropped when the catalog is built.
#[derive(Debug, Clone, Default)]
pub struct DefinitionCatalog {
    columns: BTreeMap<String, CustomColumn>,
}

impl DefinitionCatalog {
    pub fn from_definitions(definitions: &[FieldDefinition]) -> Self {
        let mut columns = BTreeMap::new();
        for def in definitions {
            let column = match parse_custom_field_id(&def.field_id) {
                Ok(column) => column,
                Err(err) => {
                    tracing::debug!(field_id = %def.field_id, error = %err, "skipping non-custom definition");
                    continue;
                }
            };
            if column.field_type() != def.field_type {
                tracing::warn!(
                    field_id = %def.field_id,
                    declared = %def.field_type,
                    column = %column.field_type(),
                    "custom field definition disagrees with its column kind"
                );
                continue;
            }
            columns.insert(def.field_id.clone(), column);
        }
        DefinitionCatalog { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl CustomFieldCatalog for DefinitionCatalog {
    fn resolve(&self, field_id: &str) -> Option<CustomColumn> {
        self.columns.get(field_id).copied()
    }
}
