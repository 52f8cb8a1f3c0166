//! Child-collection correlator.
//!
//! Pairs children of a parent's `<name>List` collection across two snapshots
//! by their identifier field and reports which identifiers saw a matching
//! transition. Only identifiers present before the change are inspected;
//! children added by the change are never reported.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use fieldwatch_core::{ChangeCriteria, CustomFieldCatalog, Entity, Value};

use crate::access::field_value;
use crate::change::is_value_change_event;
use crate::config::DetectorConfig;

/// Command property naming the child entity that changed.
pub const CHILD_ENTITY_NAME_PROP: &str = "childEntityName";
/// Command property listing the changed child identifiers.
pub const CHILD_IDS_PROP: &str = "duid";

/// Result of a child-level evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildChangeSet {
    pub child_entity: Option<String>,
    pub changed_ids: BTreeSet<String>,
}

impl ChildChangeSet {
    fn unchanged(child_entity: Option<String>) -> Self {
        Self {
            child_entity,
            changed_ids: BTreeSet::new(),
        }
    }

    pub fn changed(&self) -> bool {
        !self.changed_ids.is_empty()
    }

    /// Properties handed to the triggered command. Empty when nothing
    /// changed.
    pub fn command_props(&self) -> BTreeMap<String, String> {
        let mut props = BTreeMap::new();
        if !self.changed() {
            return props;
        }
        if let Some(name) = &self.child_entity {
            props.insert(CHILD_ENTITY_NAME_PROP.to_string(), name.clone());
        }
        let ids: Vec<&str> = self.changed_ids.iter().map(String::as_str).collect();
        props.insert(CHILD_IDS_PROP.to_string(), ids.join(","));
        props
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Child entity name from a `"<level>.<name>"` path, if the path has one.
pub fn parse_child_path(child_path: &str) -> Option<&str> {
    child_path
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .nth(1)
}

/// Evaluate `criteria` on every child of `child_path` that exists in
/// `before`.
pub fn is_child_level_field_change_event(
    criteria: &ChangeCriteria,
    before: Option<&Entity>,
    after: Option<&Entity>,
    child_path: &str,
    catalog: &dyn CustomFieldCatalog,
    config: &DetectorConfig,
) -> ChildChangeSet {
    let child_entity = parse_child_path(child_path);
    let result_name = child_entity.map(str::to_string);

    if !criteria.has_source() {
        tracing::warn!(child_path, "trigger criteria has no source field; skipping");
        return ChildChangeSet::unchanged(result_name);
    }
    let Some(child_entity) = child_entity else {
        tracing::debug!(child_path, "child path has no entity segment");
        return ChildChangeSet::unchanged(result_name);
    };

    let collection = config.collection_name(child_entity);
    let before_children = before.and_then(|e| e.children(&collection));
    let after_children = after.and_then(|e| e.children(&collection));
    let (Some(before_children), Some(after_children)) = (before_children, after_children) else {
        tracing::debug!(collection = %collection, "child collection missing on one side");
        return ChildChangeSet::unchanged(result_name);
    };

    let source = criteria.source_id.as_str();
    let before_map = index_children(before_children, source, catalog, config);
    let after_map = index_children(after_children, source, catalog, config);

    let mut changed_ids = BTreeSet::new();
    for (id, before_value) in &before_map {
        let after_value = after_map.get(id).copied().flatten();
        if is_value_change_event(
            *before_value,
            after_value,
            &criteria.from_value,
            &criteria.to_value,
        ) {
            changed_ids.insert(id.clone());
        }
    }

    if !changed_ids.is_empty() {
        tracing::debug!(
            collection = %collection,
            source_id = source,
            changed = changed_ids.len(),
            "child field changes detected"
        );
    }
    ChildChangeSet {
        child_entity: result_name,
        changed_ids,
    }
}

/// Identifier -> watched field value. Later duplicates replace earlier ones.
fn index_children<'a>(
    children: &'a [Entity],
    source_id: &str,
    catalog: &dyn CustomFieldCatalog,
    config: &DetectorConfig,
) -> BTreeMap<String, Option<&'a Value>> {
    let mut map = BTreeMap::new();
    for child in children {
        let id = match child.field(&config.child_id_field) {
            Some(v) => v.to_string(),
            None => {
                tracing::debug!(id_field = %config.child_id_field, "child without identifier skipped");
                continue;
            }
        };
        if id.is_empty() {
            tracing::debug!(id_field = %config.child_id_field, "child with blank identifier skipped");
            continue;
        }
        map.insert(id, field_value(Some(child), source_id, catalog));
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldwatch_core::{ConventionCatalog, Criterion, CustomColumn, CustomFieldKind};

    fn child(duid: &str, v: i64) -> Entity {
        Entity::new().with_field("duid", duid).with_field("v", v)
    }

    fn parent(children: Vec<Entity>) -> Entity {
        Entity::new().with_children("itemList", children)
    }

    fn eval(
        criteria: &ChangeCriteria,
        before: &Entity,
        after: &Entity,
        path: &str,
    ) -> ChildChangeSet {
        is_child_level_field_change_event(
            criteria,
            Some(before),
            Some(after),
            path,
            &ConventionCatalog,
            &DetectorConfig::default(),
        )
    }

    #[test]
    fn child_path_takes_second_segment() {
        assert_eq!(parse_child_path("order.item"), Some("item"));
        assert_eq!(parse_child_path("order..item.extra"), Some("item"));
        assert_eq!(parse_child_path("order"), None);
        assert_eq!(parse_child_path(""), None);
    }

    #[test]
    fn reports_changed_children() {
        let before = parent(vec![child("a", 1), child("b", 2)]);
        let after = parent(vec![child("a", 1), child("b", 9)]);
        let result = eval(&ChangeCriteria::any_change("v"), &before, &after, "order.item");

        assert!(result.changed());
        assert_eq!(result.child_entity.as_deref(), Some("item"));
        assert_eq!(result.changed_ids, BTreeSet::from(["b".to_string()]));
    }

    #[test]
    fn added_children_are_not_inspected() {
        let before = parent(vec![child("a", 1)]);
        let after = parent(vec![child("a", 1), child("c", 3)]);
        let result = eval(&ChangeCriteria::any_change("v"), &before, &after, "order.item");
        assert!(!result.changed());
    }

    #[test]
    fn removed_children_compare_against_unset() {
        let before = parent(vec![child("a", 1), child("b", 2)]);
        let after = parent(vec![child("a", 1)]);
        let criteria = ChangeCriteria::new("v", Criterion::Any, Criterion::Empty);
        let result = eval(&criteria, &before, &after, "order.item");
        assert_eq!(result.changed_ids, BTreeSet::from(["b".to_string()]));
    }

    #[test]
    fn custom_fields_on_children_are_read_through_the_catalog() {
        let slot = CustomColumn::new(CustomFieldKind::Number, 1);
        let custom_child =
            |duid: &str, n: i64| Entity::new().with_field("duid", duid).with_custom(slot, n);
        let before = parent(vec![custom_child("a", 1), custom_child("b", 2)]);
        let after = parent(vec![custom_child("a", 1), custom_child("b", 3)]);

        let result = eval(
            &ChangeCriteria::any_change("custNumber1"),
            &before,
            &after,
            "order.item",
        );
        assert_eq!(result.changed_ids, BTreeSet::from(["b".to_string()]));

        let literal = ChangeCriteria::new("custNumber1", "2", "3");
        let result = eval(&literal, &before, &after, "order.item");
        assert_eq!(result.changed_ids, BTreeSet::from(["b".to_string()]));
    }

    #[test]
    fn children_without_identifier_are_skipped() {
        let anonymous = Entity::new().with_field("v", 1_i64);
        let anonymous_after = Entity::new().with_field("v", 2_i64);
        let before = parent(vec![anonymous, child("a", 1)]);
        let after = parent(vec![anonymous_after, child("a", 1)]);
        let result = eval(&ChangeCriteria::any_change("v"), &before, &after, "order.item");
        assert!(!result.changed());
    }

    #[test]
    fn duplicate_identifier_last_wins() {
        let before = parent(vec![child("a", 1), child("a", 5)]);
        let after = parent(vec![child("a", 5)]);
        let result = eval(&ChangeCriteria::any_change("v"), &before, &after, "order.item");
        assert!(!result.changed());
    }

    #[test]
    fn malformed_path_or_missing_collection_is_unchanged() {
        let before = parent(vec![child("a", 1)]);
        let after = parent(vec![child("a", 2)]);
        let criteria = ChangeCriteria::any_change("v");

        assert!(!eval(&criteria, &before, &after, "order").changed());
        assert!(!eval(&criteria, &before, &after, "order.line").changed());
        assert!(!eval(&criteria, &before, &Entity::new(), "order.item").changed());
    }

    #[test]
    fn blank_source_is_unchanged() {
        let before = parent(vec![child("a", 1)]);
        let after = parent(vec![child("a", 2)]);
        let result = eval(&ChangeCriteria::any_change(""), &before, &after, "order.item");
        assert!(!result.changed());
    }

    #[test]
    fn collection_suffix_and_id_field_follow_config() {
        let config = DetectorConfig {
            child_id_field: "lineNo".to_string(),
            collection_suffix: "s".to_string(),
            ..DetectorConfig::default()
        };
        let line = |n: i64, qty: i64| Entity::new().with_field("lineNo", n).with_field("qty", qty);
        let before = Entity::new().with_children("lines", vec![line(1, 10), line(2, 20)]);
        let after = Entity::new().with_children("lines", vec![line(1, 11), line(2, 20)]);

        let result = is_child_level_field_change_event(
            &ChangeCriteria::any_change("qty"),
            Some(&before),
            Some(&after),
            "order.line",
            &ConventionCatalog,
            &config,
        );
        assert_eq!(result.changed_ids, BTreeSet::from(["1".to_string()]));
    }

    #[test]
    fn command_props_join_ids() {
        let result = ChildChangeSet {
            child_entity: Some("item".to_string()),
            changed_ids: BTreeSet::from(["b".to_string(), "a".to_string()]),
        };
        let props = result.command_props();
        assert_eq!(props.get(CHILD_ENTITY_NAME_PROP).map(String::as_str), Some("item"));
        assert_eq!(props.get(CHILD_IDS_PROP).map(String::as_str), Some("a,b"));

        assert!(ChildChangeSet::default().command_props().is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let result = ChildChangeSet {
            child_entity: Some("item".to_string()),
            changed_ids: BTreeSet::from(["b".to_string()]),
        };
        assert_eq!(
            result.to_json(),
            serde_json::json!({ "childEntity": "item", "changedIds": ["b"] })
        );
    }
}
