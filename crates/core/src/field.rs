//! Declared field types and caller-supplied field definitions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownFieldType;

/// The declared type of a field, as recorded in the field-definition
/// catalog. Selects the identity rule used by typed equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    MemoText,
    Date,
    DateTime,
    Number,
    Decimal,
    Codelist,
    Dropdown,
    HclGroup,
    Checkbox,
    Selection,
    Attachment,
}

impl FieldType {
    pub const ALL: [FieldType; 12] = [
        FieldType::Text,
        FieldType::MemoText,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::Number,
        FieldType::Decimal,
        FieldType::Codelist,
        FieldType::Dropdown,
        FieldType::HclGroup,
        FieldType::Checkbox,
        FieldType::Selection,
        FieldType::Attachment,
    ];

    /// Wire name used in field definitions.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::MemoText => "MemoText",
            FieldType::Date => "Date",
            FieldType::DateTime => "DateTime",
            FieldType::Number => "Number",
            FieldType::Decimal => "Decimal",
            FieldType::Codelist => "Codelist",
            FieldType::Dropdown => "Dropdown",
            FieldType::HclGroup => "HclGroup",
            FieldType::Checkbox => "Checkbox",
            FieldType::Selection => "Selection",
            FieldType::Attachment => "Attachment",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive. `Hcl` is accepted for `HclGroup` and `Boolean` for
/// `Checkbox`.
impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let ft = match lowered.as_str() {
            "text" => FieldType::Text,
            "memotext" => FieldType::MemoText,
            "date" => FieldType::Date,
            "datetime" => FieldType::DateTime,
            "number" => FieldType::Number,
            "decimal" => FieldType::Decimal,
            "codelist" => FieldType::Codelist,
            "dropdown" => FieldType::Dropdown,
            "hclgroup" | "hcl" => FieldType::HclGroup,
            "checkbox" | "boolean" => FieldType::Checkbox,
            "selection" => FieldType::Selection,
            "attachment" => FieldType::Attachment,
            _ => return Err(UnknownFieldType(s.to_string())),
        };
        Ok(ft)
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One entry of the field-definition list that governs a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub field_id: String,
    pub field_type: FieldType,
}

impl FieldDefinition {
    pub fn new(field_id: impl Into<String>, field_type: FieldType) -> Self {
        FieldDefinition {
            field_id: field_id.into(),
            field_type,
        }
    }
}
