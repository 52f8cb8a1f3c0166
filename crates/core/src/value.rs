//! Runtime field values.
//!
//! Every field read from an entity snapshot is a [`Value`]. The variant is
//! the runtime type; there is no separate null variant -- an absent value
//! is `None` at the call site.

use rust_decimal::Decimal;
use std::fmt;
use time::{Date, PrimitiveDateTime};

// ──────────────────────────────────────────────
// Reference values
// ──────────────────────────────────────────────

/// A value picked from a controlled vocabulary.
///
/// Only `code` takes part in typed equality; `name` is display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodelistValue {
    pub code: String,
    pub name: Option<String>,
}

impl CodelistValue {
    pub fn new(code: impl Into<String>) -> Self {
        CodelistValue {
            code: code.into(),
            name: None,
        }
    }

    pub fn named(code: impl Into<String>, name: impl Into<String>) -> Self {
        CodelistValue {
            code: code.into(),
            name: Some(name.into()),
        }
    }
}

/// A node of a hierarchical codelist, identified by its full path code
/// (e.g. `"APPAREL/MEN/SHIRTS"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HclValue {
    pub full_code: String,
    pub name: Option<String>,
}

impl HclValue {
    pub fn new(full_code: impl Into<String>) -> Self {
        HclValue {
            full_code: full_code.into(),
            name: None,
        }
    }
}

/// A file attached to a record. Identity is the attachment id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    pub id: String,
    pub file_name: Option<String>,
}

impl AttachmentRef {
    pub fn new(id: impl Into<String>) -> Self {
        AttachmentRef {
            id: id.into(),
            file_name: None,
        }
    }
}

// ──────────────────────────────────────────────
// Value
// ──────────────────────────────────────────────

/// A field value as held by an entity snapshot.
///
/// Numbers are `i64`; decimals are `rust_decimal::Decimal` -- never `f64`.
///
/// `==` is plain equality: decimals are equal only when both the number and
/// the scale agree (`2.5 != 2.50`). Numeric comparison at a fixed scale is
/// the job of typed equality in the engine.
#[derive(Debug, Clone, Eq)]
pub enum Value {
    Text(String),
    Number(i64),
    Decimal(Decimal),
    Bool(bool),
    Date(Date),
    DateTime(PrimitiveDateTime),
    Codelist(CodelistValue),
    Codelists(Vec<CodelistValue>),
    Hcl(HclValue),
    Attachment(AttachmentRef),
}

impl Value {
    /// Returns a human-readable type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "Text",
            Value::Number(_) => "Number",
            Value::Decimal(_) => "Decimal",
            Value::Bool(_) => "Bool",
            Value::Date(_) => "Date",
            Value::DateTime(_) => "DateTime",
            Value::Codelist(_) => "Codelist",
            Value::Codelists(_) => "Codelists",
            Value::Hcl(_) => "Hcl",
            Value::Attachment(_) => "Attachment",
        }
    }

    /// True when both values are the same variant, regardless of content.
    pub fn same_kind(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn codelist(code: impl Into<String>) -> Self {
        Value::Codelist(CodelistValue::new(code))
    }

    pub fn hcl(full_code: impl Into<String>) -> Self {
        Value::Hcl(HclValue::new(full_code))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b && a.scale() == b.scale(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Codelist(a), Value::Codelist(b)) => a == b,
            (Value::Codelists(a), Value::Codelists(b)) => a == b,
            (Value::Hcl(a), Value::Hcl(b)) => a == b,
            (Value::Attachment(a), Value::Attachment(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Date> for Value {
    fn from(d: Date) -> Self {
        Value::Date(d)
    }
}

impl From<PrimitiveDateTime> for Value {
    fn from(dt: PrimitiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

/// Canonical string form.
///
/// Dates render as ISO-8601 local dates. Date-times render as
/// `YYYY-MM-DDTHH:MM`, with `:SS` only when seconds or a fraction are
/// present, and the fraction in the shortest of 3, 6 or 9 digits that is
/// exact. Reference values render as their identity code.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Date(d) => write_date(f, *d),
            Value::DateTime(dt) => {
                write_date(f, dt.date())?;
                write!(f, "T{:02}:{:02}", dt.hour(), dt.minute())?;
                let (second, nanos) = (dt.second(), dt.nanosecond());
                if second == 0 && nanos == 0 {
                    return Ok(());
                }
                write!(f, ":{:02}", second)?;
                if nanos == 0 {
                    Ok(())
                } else if nanos % 1_000_000 == 0 {
                    write!(f, ".{:03}", nanos / 1_000_000)
                } else if nanos % 1_000 == 0 {
                    write!(f, ".{:06}", nanos / 1_000)
                } else {
                    write!(f, ".{:09}", nanos)
                }
            }
            Value::Codelist(c) => f.write_str(&c.code),
            Value::Codelists(list) => {
                for (i, c) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(&c.code)?;
                }
                Ok(())
            }
            Value::Hcl(h) => f.write_str(&h.full_code),
            Value::Attachment(a) => f.write_str(&a.id),
        }
    }
}

fn write_date(f: &mut fmt::Formatter<'_>, d: Date) -> fmt::Result {
    write!(
        f,
        "{:04}-{:02}-{:02}",
        d.year(),
        u8::from(d.month()),
        d.day()
    )
}
