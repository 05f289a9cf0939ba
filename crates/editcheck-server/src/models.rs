//! Request models for the validation endpoint.
//!
//! The typed model rejects structurally malformed payloads (unknown
//! fields, bad dates, wrong types) before the engine ever runs; content
//! problems like a malformed SSN are the rule set's job and come back
//! as rule failures, not request errors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Student identity section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StudentInfo {
    pub first_name: String,
    pub last_name: String,
    /// Format is enforced by a string_match rule, not here.
    pub ssn: String,
    pub date_of_birth: NaiveDate,
}

/// Spouse identity section, required by rule only for married applicants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpouseInfo {
    pub name: String,
    pub ssn: String,
}

/// Household composition section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Household {
    pub number_in_household: i64,
    pub number_in_college: i64,
}

/// Income section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Income {
    pub student_income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_income: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Dependent,
    Independent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
}

/// A submitted application record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApplicationData {
    pub student_info: StudentInfo,
    pub household: Household,
    pub income: Income,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_info: Option<SpouseInfo>,
    pub state_of_residence: String,
    pub dependency_status: DependencyStatus,
    pub marital_status: MaritalStatus,
}
