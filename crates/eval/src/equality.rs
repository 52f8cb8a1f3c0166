//! Typed equality: are two values of a declared field type the same?
//!
//! The declared type picks the identity rule. Codelists compare by code,
//! hierarchical codes by full code, selections as code sets, attachments by
//! id, and decimals after rounding both sides half-up to a fixed scale.
//! Anything else compares structurally.

use rust_decimal::{Decimal, RoundingStrategy};

use fieldwatch_core::{FieldType, Value};

use crate::reference::{is_attachment_updated, is_codelists_updated};

/// Fractional digits kept before comparing decimal fields.
pub const DECIMAL_SCALE: u32 = 5;

/// Typed equality at the default decimal scale.
pub fn values_equal(a: Option<&Value>, b: Option<&Value>, field_type: FieldType) -> bool {
    values_equal_at_scale(a, b, field_type, DECIMAL_SCALE)
}

/// Typed equality with an explicit decimal scale.
///
/// Precedence: both unset are equal; one unset is not; different runtime
/// variants are not; then the declared type's identity rule, falling back
/// to structural equality when that rule does not apply to the variant.
pub fn values_equal_at_scale(
    a: Option<&Value>,
    b: Option<&Value>,
    field_type: FieldType,
    decimal_scale: u32,
) -> bool {
    let (a, b) = match (a, b) {
        (None, None) => return true,
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };
    if !a.same_kind(b) {
        return false;
    }

    match (field_type, a, b) {
        (FieldType::Codelist | FieldType::Dropdown, Value::Codelist(x), Value::Codelist(y)) => {
            x.code == y.code
        }
        (FieldType::HclGroup, Value::Hcl(x), Value::Hcl(y)) => x.full_code == y.full_code,
        (FieldType::Decimal, Value::Decimal(x), Value::Decimal(y)) => {
            round_half_up(*x, decimal_scale) == round_half_up(*y, decimal_scale)
        }
        (FieldType::Selection, Value::Codelists(x), Value::Codelists(y)) => {
            !is_codelists_updated(x, y)
        }
        (FieldType::Attachment, Value::Attachment(x), Value::Attachment(y)) => {
            !is_attachment_updated(Some(x), Some(y))
        }
        _ => a == b,
    }
}

/// Round to `scale` fractional digits, ties away from zero.
pub fn round_half_up(d: Decimal, scale: u32) -> Decimal {
    d.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}
