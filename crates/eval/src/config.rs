//! Detector configuration.
//!
//! Loaded from TOML; every key is optional and defaults to the behaviour
//! trigger rules were written against:
//!
//! ```toml
//! decimal_scale = 5
//! child_id_field = "duid"
//! collection_suffix = "List"
//! ```

use serde::{Deserialize, Serialize};

use fieldwatch_core::ConfigError;

/// Largest scale `rust_decimal` can represent.
const MAX_DECIMAL_SCALE: u32 = 28;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Fractional digits kept (half-up) before comparing decimal fields.
    pub decimal_scale: u32,
    /// Fixed field on a child entity that correlates it across snapshots.
    pub child_id_field: String,
    /// Appended to a child path's entity name to find its collection
    /// (`item` -> `itemList`).
    pub collection_suffix: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            decimal_scale: crate::equality::DECIMAL_SCALE,
            child_id_field: "duid".to_string(),
            collection_suffix: "List".to_string(),
        }
    }
}

impl DetectorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: DetectorConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimal_scale > MAX_DECIMAL_SCALE {
            return Err(ConfigError::Invalid {
                key: "decimal_scale",
                message: format!("must be at most {}", MAX_DECIMAL_SCALE),
            });
        }
        if self.child_id_field.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "child_id_field",
                message: "must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Name of the collection property holding children of `entity_name`.
    pub fn collection_name(&self, entity_name: &str) -> String {
        format!("{}{}", entity_name, self.collection_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = DetectorConfig::from_toml_str("").unwrap();
        assert_eq!(config, DetectorConfig::default());
        assert_eq!(config.decimal_scale, 5);
        assert_eq!(config.child_id_field, "duid");
        assert_eq!(config.collection_name("item"), "itemList");
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = DetectorConfig::from_toml_str("decimal_scale = 2").unwrap();
        assert_eq!(config.decimal_scale, 2);
        assert_eq!(config.collection_suffix, "List");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DetectorConfig::from_toml_str("decimal_places = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn scale_beyond_decimal_range_is_rejected() {
        let err = DetectorConfig::from_toml_str("decimal_scale = 29").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "decimal_scale",
                ..
            }
        ));
    }

    #[test]
    fn blank_child_id_field_is_rejected() {
        let err = DetectorConfig::from_toml_str("child_id_field = \" \"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "child_id_field",
                ..
            }
        ));
    }
}
