//! Conditional guards for rule evaluation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::resolve;

/// A field-equals-literal guard attached to a rule via `when`.
///
/// A rule whose guard does not hold is skipped and recorded as an
/// automatic pass; the guard is not itself a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Dotted path of the field to inspect.
    pub field: String,
    /// Literal the resolved value must equal for the guard to hold.
    pub equals: Value,
}

impl Condition {
    /// Whether the guard holds against the given record.
    ///
    /// Comparison is by value. An absent field resolves as `null`, so a
    /// guard with `equals: null` holds for missing fields as well. Two
    /// numbers compare by numeric value, so `equals: 1` holds for a
    /// record value of `1.0`; across types (string vs number) the guard
    /// does not hold.
    pub fn holds(&self, record: &Value) -> bool {
        let value = resolve(record, &self.field).unwrap_or(&Value::Null);
        match (value, &self.equals) {
            (Value::Number(actual), Value::Number(expected)) => {
                actual.as_f64() == expected.as_f64()
            }
            _ => value == &self.equals,
        }
    }
}
