//! Change-event evaluation for a single field and for a record's custom
//! fields as a whole.

use fieldwatch_core::{
    ChangeCriteria, Criterion, CustomFieldCatalog, CustomFields, Entity, FieldDefinition, Value,
};

use crate::access::field_value;
use crate::equality::values_equal_at_scale;
use crate::matcher::matches;

// ──────────────────────────────────────────────
// Single-field events
// ──────────────────────────────────────────────

/// Did a field move from a value matching `from` to one matching `to`?
///
/// Equal values are never an event, whatever the criteria. Equality here
/// is plain value equality, so rescaling a decimal (`2.5` to `2.50`) is a
/// change; route through
/// [`values_equal`](crate::equality::values_equal) first when the declared
/// type's identity rule should apply.
pub fn is_value_change_event(
    before: Option<&Value>,
    after: Option<&Value>,
    from: &Criterion,
    to: &Criterion,
) -> bool {
    if before == after {
        return false;
    }
    matches(before, from) && matches(after, to)
}

/// Read `source_id` from both snapshots and evaluate the transition.
///
/// Either snapshot may be absent (creation or deletion); the field then
/// reads as unset on that side. A blank `source_id` never fires.
pub fn is_field_change_event(
    source_id: &str,
    before: Option<&Entity>,
    after: Option<&Entity>,
    from: &Criterion,
    to: &Criterion,
    catalog: &dyn CustomFieldCatalog,
) -> bool {
    if source_id.trim().is_empty() {
        tracing::warn!("trigger criteria has no source field; skipping");
        return false;
    }

    let before_value = field_value(before, source_id, catalog);
    let after_value = field_value(after, source_id, catalog);
    tracing::debug!(
        source_id,
        before = ?before_value,
        after = ?after_value,
        from = %from,
        to = %to,
        "evaluating field change"
    );

    is_value_change_event(before_value, after_value, from, to)
}

/// [`is_field_change_event`] driven by a rule's criteria.
pub fn is_criteria_change_event(
    criteria: &ChangeCriteria,
    before: Option<&Entity>,
    after: Option<&Entity>,
    catalog: &dyn CustomFieldCatalog,
) -> bool {
    is_field_change_event(
        &criteria.source_id,
        before,
        after,
        &criteria.from_value,
        &criteria.to_value,
        catalog,
    )
}

// ──────────────────────────────────────────────
// Aggregate custom-field diff
// ──────────────────────────────────────────────

/// Did any custom field governed by `definitions` change?
///
/// Each definition's field is read from both containers and compared with
/// typed equality under the definition's declared type. Stops at the first
/// difference. A definition the catalog cannot resolve reads as unset on
/// both sides and so never counts as a change.
pub fn is_custom_field_updated(
    before: Option<&CustomFields>,
    after: Option<&CustomFields>,
    definitions: &[FieldDefinition],
    catalog: &dyn CustomFieldCatalog,
    decimal_scale: u32,
) -> bool {
    if definitions.is_empty() {
        return false;
    }
    if before.is_none() && after.is_none() {
        return false;
    }

    for def in definitions {
        let Some(column) = catalog.resolve(&def.field_id) else {
            tracing::debug!(field_id = %def.field_id, "custom field not in catalog; skipping");
            continue;
        };
        let before_value = before.and_then(|c| c.get(&column));
        let after_value = after.and_then(|c| c.get(&column));

        match (before_value, after_value) {
            (None, None) => continue,
            (None, Some(_)) | (Some(_), None) => {
                tracing::debug!(field_id = %def.field_id, "custom field set or cleared");
                return true;
            }
            (Some(_), Some(_)) => {
                if !values_equal_at_scale(before_value, after_value, def.field_type, decimal_scale)
                {
                    tracing::debug!(
                        field_id = %def.field_id,
                        field_type = %def.field_type,
                        "custom field changed"
                    );
                    return true;
                }
            }
        }
    }
    false
}

/// [`is_custom_field_updated`] over two entity snapshots.
pub fn is_entity_custom_field_updated(
    before: Option<&Entity>,
    after: Option<&Entity>,
    definitions: &[FieldDefinition],
    catalog: &dyn CustomFieldCatalog,
    decimal_scale: u32,
) -> bool {
    is_custom_field_updated(
        before.and_then(Entity::custom_fields),
        after.and_then(Entity::custom_fields),
        definitions,
        catalog,
        decimal_scale,
    )
}
