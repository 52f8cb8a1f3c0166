//! Criteria matcher: does a field value satisfy one side of a trigger rule?
//!
//! `$ANY` matches unconditionally. Otherwise an unset value reads as the
//! empty string and `$EMPTY` as the literal `""`. Reference values and
//! dates compare by their canonical string; text compares verbatim; the
//! remaining scalar types coerce the literal into the value's type first
//! and compare with plain equality, so a decimal literal must carry the
//! stored scale (`"2.50"` matches `2.50`, `"2.5"` does not).

use std::str::FromStr;

use rust_decimal::Decimal;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

use fieldwatch_core::{CodelistValue, CoercionError, Criterion, HclValue, Value};

/// True if `value` satisfies `criterion`.
pub fn matches(value: Option<&Value>, criterion: &Criterion) -> bool {
    let literal = match criterion {
        Criterion::Any => return true,
        Criterion::Empty => "",
        Criterion::Literal(s) => s.as_str(),
    };
    let Some(value) = value else {
        return literal.is_empty();
    };

    match value {
        Value::Text(s) => s == literal,
        Value::Codelist(c) => c.code == literal,
        Value::Hcl(h) => h.full_code == literal,
        Value::Date(_) | Value::DateTime(_) => value.to_string() == literal,
        _ => match coerce_literal(value, literal) {
            Ok(target) => *value == target,
            Err(err) => {
                tracing::warn!(
                    value_type = value.type_name(),
                    literal,
                    error = %err,
                    "criterion literal not comparable; treating as no match"
                );
                false
            }
        },
    }
}

/// Convert a criterion literal into a value of the same variant as
/// `template`.
///
/// Numbers parse as `i64`; decimals accept plain or scientific notation;
/// booleans accept `true`/`false` in any case; dates and date-times accept
/// ISO-8601 local forms. Codelist selections and attachments cannot be
/// expressed as a literal.
pub fn coerce_literal(template: &Value, literal: &str) -> Result<Value, CoercionError> {
    let unparsable = |target: &'static str| CoercionError::Unparsable {
        literal: literal.to_string(),
        target,
    };

    match template {
        Value::Text(_) => Ok(Value::Text(literal.to_string())),
        Value::Number(_) => literal
            .parse::<i64>()
            .map(Value::Number)
            .map_err(|_| unparsable("Number")),
        Value::Decimal(_) => Decimal::from_str(literal)
            .or_else(|_| Decimal::from_scientific(literal))
            .map(Value::Decimal)
            .map_err(|_| unparsable("Decimal")),
        Value::Bool(_) => {
            if literal.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if literal.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(unparsable("Bool"))
            }
        }
        Value::Date(_) => parse_date(literal)
            .map(Value::Date)
            .ok_or_else(|| unparsable("Date")),
        Value::DateTime(_) => parse_datetime(literal)
            .map(Value::DateTime)
            .ok_or_else(|| unparsable("DateTime")),
        Value::Codelist(_) => Ok(Value::Codelist(CodelistValue::new(literal))),
        Value::Hcl(_) => Ok(Value::Hcl(HclValue::new(literal))),
        Value::Codelists(_) | Value::Attachment(_) => Err(CoercionError::Unsupported {
            target: template.type_name(),
        }),
    }
}

fn parse_date(s: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(s, &format).ok()
}

fn parse_datetime(s: &str) -> Option<PrimitiveDateTime> {
    let with_fraction =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    let with_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let minutes_only = format_description!("[year]-[month]-[day]T[hour]:[minute]");

    PrimitiveDateTime::parse(s, &with_fraction)
        .or_else(|_| PrimitiveDateTime::parse(s, &with_seconds))
        .or_else(|_| PrimitiveDateTime::parse(s, &minutes_only))
        .ok()
}
