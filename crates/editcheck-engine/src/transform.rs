//! Derived-field transforms.
//!
//! Transforms run before any rule is evaluated and write computed values
//! into the working copy of the record, so rules can target derived
//! fields exactly like submitted ones.

use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

/// A pure derivation: reads an optional source value, returns the value
/// to assign at the target path. Must not depend on any other part of
/// the record.
pub type TransformFn = fn(Option<&Value>) -> Value;

/// A transform entry as declared in the configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformDefinition {
    pub name: String,
    /// Dot-separated path of the input value.
    pub field: String,
    /// Key into the [`TransformRegistry`].
    pub transform: String,
    /// Dot-separated path the computed value is assigned to.
    pub output_field: String,
}

/// Named lookup of transform functions.
///
/// Each engine owns its registry, so callers can register additional
/// transforms without affecting other engine instances.
#[derive(Debug, Clone)]
pub struct TransformRegistry {
    functions: HashMap<String, TransformFn>,
}

impl TransformRegistry {
    /// An empty registry with no transforms at all.
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// A registry preloaded with the built-in transforms.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("age_years", age_years);
        registry
    }

    /// Register a transform under a name, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, function: TransformFn) {
        self.functions.insert(name.into(), function);
    }

    /// Look up a transform by name.
    pub fn get(&self, name: &str) -> Option<TransformFn> {
        self.functions.get(name).copied()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Compute whole years elapsed since an ISO `YYYY-MM-DD` date string,
/// relative to today.
///
/// The year difference is decremented when this year's anniversary has
/// not yet occurred. Absent or unparsable input yields `null` rather
/// than an error; downstream rules decide what that means.
pub fn age_years(value: Option<&Value>) -> Value {
    let date = match value {
        Some(Value::String(s)) => match s.parse::<NaiveDate>() {
            Ok(date) => date,
            Err(_) => return Value::Null,
        },
        _ => return Value::Null,
    };

    let today = Local::now().date_naive();
    let mut age = today.year() - date.year();
    if (today.month(), today.day()) < (date.month(), date.day()) {
        age -= 1;
    }
    Value::from(age)
}
