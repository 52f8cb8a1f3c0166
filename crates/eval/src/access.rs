//! Field accessor: one read path for fixed and custom fields.
//!
//! [`try_field_value`] reports why a read failed; [`field_value`] is the
//! best-effort form the engine uses, where every failure reads as an
//! unset value so that a stale rule never aborts the evaluation around it.

use fieldwatch_core::{
    is_custom_field_id, AccessError, CustomFieldCatalog, Entity, Property, Value,
};

/// Read `field_name` from `entity`.
///
/// `Ok(None)` means the field is legitimately unset. `Err` means the read
/// itself was not possible (no entity, blank name, a collection where a
/// scalar was expected, or a custom field the catalog or entity cannot
/// supply).
pub fn try_field_value<'a>(
    entity: Option<&'a Entity>,
    field_name: &str,
    catalog: &dyn CustomFieldCatalog,
) -> Result<Option<&'a Value>, AccessError> {
    if field_name.trim().is_empty() {
        return Err(AccessError::BlankFieldName);
    }
    let entity = entity.ok_or_else(|| AccessError::NoEntity {
        field: field_name.to_string(),
    })?;

    if is_custom_field_id(field_name) {
        return custom_field_value(entity, field_name, catalog);
    }

    match entity.property(field_name) {
        None => Ok(None),
        Some(Property::Scalar(v)) => Ok(Some(v)),
        Some(Property::Children(_)) => Err(AccessError::NotAScalar {
            field: field_name.to_string(),
        }),
    }
}

fn custom_field_value<'a>(
    entity: &'a Entity,
    field_id: &str,
    catalog: &dyn CustomFieldCatalog,
) -> Result<Option<&'a Value>, AccessError> {
    let custom = entity
        .custom_fields()
        .ok_or_else(|| AccessError::NoCustomFields {
            field_id: field_id.to_string(),
        })?;
    let column = catalog
        .resolve(field_id)
        .ok_or_else(|| AccessError::UnresolvedCustomField {
            field_id: field_id.to_string(),
        })?;
    Ok(custom.get(&column))
}

/// Best-effort read: any failure is logged at debug and reads as `None`.
pub fn field_value<'a>(
    entity: Option<&'a Entity>,
    field_name: &str,
    catalog: &dyn CustomFieldCatalog,
) -> Option<&'a Value> {
    match try_field_value(entity, field_name, catalog) {
        Ok(v) => v,
        Err(err) => {
            tracing::debug!(field = field_name, error = %err, "field read degraded to unset");
            None
        }
    }
}
