//! Trigger criteria: the watched field and its before/after conditions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token that matches any value, including an unset one.
pub const ANY_TOKEN: &str = "$ANY";
/// Token that matches an unset value or the empty string.
pub const EMPTY_TOKEN: &str = "$EMPTY";

/// A condition on one side of a watched transition.
///
/// Decided once from its string encoding: the two tokens are recognised
/// exactly (case-sensitive); everything else is a literal to be coerced
/// into the runtime type of the value it is matched against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Criterion {
    Any,
    Empty,
    Literal(String),
}

impl Criterion {
    pub fn parse(s: &str) -> Self {
        match s {
            ANY_TOKEN => Criterion::Any,
            EMPTY_TOKEN => Criterion::Empty,
            other => Criterion::Literal(other.to_string()),
        }
    }

    pub fn literal(s: impl Into<String>) -> Self {
        Criterion::Literal(s.into())
    }
}

impl From<&str> for Criterion {
    fn from(s: &str) -> Self {
        Criterion::parse(s)
    }
}

impl From<String> for Criterion {
    fn from(s: String) -> Self {
        match s.as_str() {
            ANY_TOKEN => Criterion::Any,
            EMPTY_TOKEN => Criterion::Empty,
            _ => Criterion::Literal(s),
        }
    }
}

impl From<Criterion> for String {
    fn from(c: Criterion) -> Self {
        match c {
            Criterion::Any => ANY_TOKEN.to_string(),
            Criterion::Empty => EMPTY_TOKEN.to_string(),
            Criterion::Literal(s) => s,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Any => f.write_str(ANY_TOKEN),
            Criterion::Empty => f.write_str(EMPTY_TOKEN),
            Criterion::Literal(s) => f.write_str(s),
        }
    }
}

/// A watched transition on one field, as authored in a trigger rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCriteria {
    /// Fixed field name or custom field id. Blank means the rule is
    /// misconfigured and never fires.
    pub source_id: String,
    pub from_value: Criterion,
    pub to_value: Criterion,
}

impl ChangeCriteria {
    pub fn new(
        source_id: impl Into<String>,
        from_value: impl Into<Criterion>,
        to_value: impl Into<Criterion>,
    ) -> Self {
        ChangeCriteria {
            source_id: source_id.into(),
            from_value: from_value.into(),
            to_value: to_value.into(),
        }
    }

    /// Matches any change at all of `source_id`.
    pub fn any_change(source_id: impl Into<String>) -> Self {
        Self::new(source_id, Criterion::Any, Criterion::Any)
    }

    pub fn has_source(&self) -> bool {
        !self.source_id.trim().is_empty()
    }
}
