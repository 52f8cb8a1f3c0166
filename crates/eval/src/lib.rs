//! fieldwatch change-detection engine -- compares two snapshots of an
//! entity and decides whether a trigger rule fires.
//!
//! The engine reads fixed and custom fields through one accessor, compares
//! them with typed equality (the declared field type picks the identity
//! rule), matches `$ANY` / `$EMPTY` / literal criteria, and correlates
//! child collections by identifier.
//!
//! Every operation is pure. Stale configuration (unknown fields, blank
//! sources, unparsable literals) degrades to "no change" with a `tracing`
//! event rather than an error; only [`DetectorConfig`] loading is fallible.

pub mod access;
pub mod cell;
pub mod change;
pub mod children;
pub mod config;
pub mod equality;
pub mod matcher;
pub mod reference;

pub use access::{field_value, try_field_value};
pub use cell::{cell_number, cell_string};
pub use change::{
    is_criteria_change_event, is_custom_field_updated, is_entity_custom_field_updated,
    is_field_change_event, is_value_change_event,
};
pub use children::{is_child_level_field_change_event, parse_child_path, ChildChangeSet};
pub use config::DetectorConfig;
pub use equality::{values_equal, values_equal_at_scale, DECIMAL_SCALE};
pub use matcher::{coerce_literal, matches};
pub use reference::{is_attachment_updated, is_codelist_updated, is_codelists_updated};

use fieldwatch_core::{
    AccessError, ChangeCriteria, ConfigError, ConventionCatalog, Criterion, CustomFieldCatalog,
    CustomFields, Entity, FieldDefinition, FieldType, Value,
};

/// Configured entry point: a [`DetectorConfig`] plus the catalog that
/// resolves custom field ids.
///
/// The free functions in each module remain available for callers that
/// want to pass these explicitly.
#[derive(Debug, Clone)]
pub struct ChangeDetector<C: CustomFieldCatalog = ConventionCatalog> {
    config: DetectorConfig,
    catalog: C,
}

impl ChangeDetector<ConventionCatalog> {
    /// Default configuration, ids resolved by naming convention.
    pub fn new() -> Self {
        Self::with_catalog(DetectorConfig::default(), ConventionCatalog)
    }

    /// Validate `config` and pair it with the convention catalog.
    pub fn with_config(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_catalog(config, ConventionCatalog))
    }

    /// Build from a TOML document (see [`DetectorConfig::from_toml_str`]).
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Self::with_config(DetectorConfig::from_toml_str(source)?)
    }
}

impl Default for ChangeDetector<ConventionCatalog> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CustomFieldCatalog> ChangeDetector<C> {
    /// Pair a configuration with a caller-supplied catalog. The
    /// configuration is taken as already validated.
    pub fn with_catalog(config: DetectorConfig, catalog: C) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn try_field_value<'a>(
        &self,
        entity: Option<&'a Entity>,
        field_name: &str,
    ) -> Result<Option<&'a Value>, AccessError> {
        access::try_field_value(entity, field_name, &self.catalog)
    }

    pub fn field_value<'a>(&self, entity: Option<&'a Entity>, field_name: &str) -> Option<&'a Value> {
        access::field_value(entity, field_name, &self.catalog)
    }

    /// Typed equality at the configured decimal scale.
    pub fn values_equal(&self, a: Option<&Value>, b: Option<&Value>, field_type: FieldType) -> bool {
        equality::values_equal_at_scale(a, b, field_type, self.config.decimal_scale)
    }

    pub fn is_field_change_event(
        &self,
        source_id: &str,
        before: Option<&Entity>,
        after: Option<&Entity>,
        from: &Criterion,
        to: &Criterion,
    ) -> bool {
        change::is_field_change_event(source_id, before, after, from, to, &self.catalog)
    }

    pub fn is_criteria_change_event(
        &self,
        criteria: &ChangeCriteria,
        before: Option<&Entity>,
        after: Option<&Entity>,
    ) -> bool {
        change::is_criteria_change_event(criteria, before, after, &self.catalog)
    }

    pub fn is_custom_field_updated(
        &self,
        before: Option<&CustomFields>,
        after: Option<&CustomFields>,
        definitions: &[FieldDefinition],
    ) -> bool {
        change::is_custom_field_updated(
            before,
            after,
            definitions,
            &self.catalog,
            self.config.decimal_scale,
        )
    }

    pub fn is_entity_custom_field_updated(
        &self,
        before: Option<&Entity>,
        after: Option<&Entity>,
        definitions: &[FieldDefinition],
    ) -> bool {
        change::is_entity_custom_field_updated(
            before,
            after,
            definitions,
            &self.catalog,
            self.config.decimal_scale,
        )
    }

    pub fn is_child_level_field_change_event(
        &self,
        criteria: &ChangeCriteria,
        before: Option<&Entity>,
        after: Option<&Entity>,
        child_path: &str,
    ) -> ChildChangeSet {
        children::is_child_level_field_change_event(
            criteria,
            before,
            after,
            child_path,
            &self.catalog,
            &self.config,
        )
    }
}
