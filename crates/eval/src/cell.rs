//! Flat renderings of field values for report cells and exports.

use std::str::FromStr;

use rust_decimal::Decimal;

use fieldwatch_core::Value;

/// String form of a value. Booleans render as `"1"` / `"0"`.
pub fn cell_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        other => Some(other.to_string()),
    }
}

/// Numeric form of a value, if it has one.
///
/// Text is parsed after trimming; anything that is not a number reads as
/// `None`.
pub fn cell_number(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => Some(Decimal::from(*n)),
        Value::Decimal(d) => Some(*d),
        Value::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Value::Text(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        _ => None,
    }
}
