//! Entity snapshots.

use std::collections::BTreeMap;

use crate::custom::{CustomColumn, CustomFields};
use crate::value::Value;

/// A named property of an entity: either a scalar value or a collection
/// of child entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    Scalar(Value),
    Children(Vec<Entity>),
}

/// A read-only snapshot of a business record.
///
/// Fixed fields and child collections share one namespace, the way they
/// do on the records this models (`status`, `itemList`, ...). Custom
/// fields live in a separate container that may be absent altogether.
/// A property whose value is unset is simply not present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entity {
    properties: BTreeMap<String, Property>,
    custom_fields: Option<CustomFields>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style scalar field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Builder-style child collection.
    pub fn with_children(mut self, name: impl Into<String>, children: Vec<Entity>) -> Self {
        self.properties
            .insert(name.into(), Property::Children(children));
        self
    }

    /// Builder-style custom field. Creates the container on first use.
    pub fn with_custom(mut self, column: CustomColumn, value: impl Into<Value>) -> Self {
        self.custom_fields
            .get_or_insert_with(CustomFields::new)
            .set(column, value);
        self
    }

    /// Replace the whole custom container.
    pub fn with_custom_fields(mut self, custom_fields: CustomFields) -> Self {
        self.custom_fields = Some(custom_fields);
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties
            .insert(name.into(), Property::Scalar(value.into()));
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// The scalar value of a fixed field, if set.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self.properties.get(name) {
            Some(Property::Scalar(v)) => Some(v),
            _ => None,
        }
    }

    /// The child collection stored under `name`, if that property is one.
    pub fn children(&self, name: &str) -> Option<&[Entity]> {
        match self.properties.get(name) {
            Some(Property::Children(c)) => Some(c),
            _ => None,
        }
    }

    pub fn custom_fields(&self) -> Option<&CustomFields> {
        self.custom_fields.as_ref()
    }
}
