//! Rule outcomes and their aggregation into a validation summary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::severity::Severity;

/// Outcome of evaluating a single rule against a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    /// Name of the rule that produced this result.
    pub name: String,
    /// Whether the rule passed.
    pub passed: bool,
    /// Configured severity of the rule.
    pub severity: Severity,
    /// The rule's configured message; present only on failure.
    pub message: Option<String>,
    /// Structured diagnostic payload (field paths, observed values, etc.).
    pub details: Option<Value>,
}

impl RuleResult {
    /// Create a passing result. Successes never carry a message.
    pub fn pass(name: impl Into<String>, severity: Severity, details: Option<Value>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            severity,
            message: None,
            details,
        }
    }

    /// Create a failing result carrying the rule's configured message.
    pub fn fail(
        name: impl Into<String>,
        severity: Severity,
        message: Option<String>,
        details: Option<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            severity,
            message,
            details,
        }
    }
}

/// Aggregated outcome of one `validate` call.
///
/// Every [`RuleResult`] appears in exactly one of the three buckets, and
/// each bucket preserves rule declaration order. `valid` is true iff no
/// error-severity rule failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Overall validity: no failed error-severity results.
    pub valid: bool,
    /// Failed results with error severity.
    pub errors: Vec<RuleResult>,
    /// Failed results with warning severity.
    pub warnings: Vec<RuleResult>,
    /// Passed results of any severity, including guard-skipped rules.
    pub successes: Vec<RuleResult>,
}

impl ValidationSummary {
    /// Classify per-rule results into errors/warnings/successes.
    pub fn from_results(results: Vec<RuleResult>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut successes = Vec::new();

        for result in results {
            if result.passed {
                successes.push(result);
            } else {
                match result.severity {
                    Severity::Error => errors.push(result),
                    Severity::Warning => warnings.push(result),
                }
            }
        }

        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            successes,
        }
    }
}
