//! "Was it updated?" checks for reference-valued fields.

use fieldwatch_core::{AttachmentRef, CodelistValue};

/// A single codelist changed if exactly one side is set, or the codes
/// differ.
pub fn is_codelist_updated(before: Option<&CodelistValue>, after: Option<&CodelistValue>) -> bool {
    match (before, after) {
        (None, None) => false,
        (Some(b), Some(a)) => b.code != a.code,
        _ => true,
    }
}

/// A codelist selection changed if the sizes differ or any code picked
/// before is no longer picked. Order does not matter.
pub fn is_codelists_updated(before: &[CodelistValue], after: &[CodelistValue]) -> bool {
    if before.is_empty() && after.is_empty() {
        return false;
    }
    if before.len() != after.len() {
        return true;
    }
    before
        .iter()
        .any(|b| !after.iter().any(|a| a.code == b.code))
}

/// An attachment changed if exactly one side is set, or the ids differ.
pub fn is_attachment_updated(before: Option<&AttachmentRef>, after: Option<&AttachmentRef>) -> bool {
    match (before, after) {
        (None, None) => false,
        (Some(b), Some(a)) => b.id != a.id,
        _ => true,
    }
}
