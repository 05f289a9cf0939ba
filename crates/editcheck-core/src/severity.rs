//! Rule severity classification.

use serde::{Deserialize, Serialize};

/// Severity of a rule, determining which bucket a failed result lands in
/// and whether it affects overall validity.
///
/// Rules without an explicit severity default to [`Severity::Error`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A failed error rule makes the whole record invalid.
    #[default]
    Error,
    /// A failed warning rule is reported but does not affect validity.
    Warning,
}
