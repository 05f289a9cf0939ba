//! Rule variant definitions and their evaluation.
//!
//! Each variant resolves its field(s) from the working copy and produces
//! exactly one [`RuleResult`]. The missing-field policy intentionally
//! differs per variant: `string_match` and `value_comparison` treat an
//! absent field as a vacuous pass (presence is a separate rule's job),
//! while `field_comparison` and `value_in_set` fail. Do not unify these.

use regex::Regex;
use serde::{de, Deserialize, Deserializer};
use serde_json::{json, Value};

use editcheck_core::{resolve, Condition, RuleResult, Severity};

/// Reason string recorded when a missing field is treated as a pass.
const FIELD_MISSING_PASS: &str = "field_missing_treated_as_pass";

/// Reason string recorded when a value cannot be coerced to a number.
const NON_NUMERIC: &str = "non_numeric";

/// A regex pattern that must match the entire input string.
///
/// Compiled once at configuration load; an invalid pattern is a fatal
/// configuration error, never an evaluation-time one.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    raw: String,
    regex: Regex,
}

impl MatchPattern {
    /// Compile a pattern, anchoring it for full-string matching.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written in the configuration document.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern matches the whole of `text`.
    pub fn is_full_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl<'de> Deserialize<'de> for MatchPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        MatchPattern::new(&raw).map_err(de::Error::custom)
    }
}

/// The field must resolve to a value that is neither absent nor empty.
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceRule {
    pub name: String,
    pub field: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub when: Option<Condition>,
}

impl PresenceRule {
    pub fn apply(&self, record: &Value) -> RuleResult {
        let value = resolve(record, &self.field);
        let passed = !is_blank(value);
        let details = json!({
            "field": self.field,
            "value": value.cloned().unwrap_or(Value::Null),
        });
        if passed {
            RuleResult::pass(&self.name, self.severity, Some(details))
        } else {
            RuleResult::fail(&self.name, self.severity, self.message.clone(), Some(details))
        }
    }
}

/// The string form of the field must fully match a regex pattern.
///
/// "If present" semantics: an absent field is a vacuous pass.
#[derive(Debug, Clone, Deserialize)]
pub struct StringMatchRule {
    pub name: String,
    pub field: String,
    pub pattern: MatchPattern,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub when: Option<Condition>,
}

impl StringMatchRule {
    pub fn apply(&self, record: &Value) -> RuleResult {
        let value = match resolve(record, &self.field) {
            None | Some(Value::Null) => {
                return RuleResult::pass(
                    &self.name,
                    self.severity,
                    Some(json!({"reason": FIELD_MISSING_PASS, "field": self.field})),
                );
            }
            Some(value) => value,
        };

        let passed = self.pattern.is_full_match(&text_form(value));
        let details = json!({
            "field": self.field,
            "value": value,
            "pattern": self.pattern.as_str(),
        });
        if passed {
            RuleResult::pass(&self.name, self.severity, Some(details))
        } else {
            RuleResult::fail(&self.name, self.severity, self.message.clone(), Some(details))
        }
    }
}

/// Numeric comparison of a field against a configured literal.
///
/// An absent field is a vacuous pass; a value (or literal) that cannot be
/// coerced to a number fails with reason `non_numeric`; an unrecognized
/// operator fails.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueComparisonRule {
    pub name: String,
    pub field: String,
    /// One of `lt`, `lte`, `gt`, `gte`, `eq`, `neq`.
    pub operator: String,
    pub value: Value,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub when: Option<Condition>,
}

impl ValueComparisonRule {
    pub fn apply(&self, record: &Value) -> RuleResult {
        let raw = match resolve(record, &self.field) {
            None | Some(Value::Null) => {
                // Missing field: pass; separate presence rules handle "required".
                return RuleResult::pass(
                    &self.name,
                    self.severity,
                    Some(json!({"reason": FIELD_MISSING_PASS, "field": self.field})),
                );
            }
            Some(raw) => raw,
        };

        let (value, threshold) = match (as_number(raw), as_number(&self.value)) {
            (Some(value), Some(threshold)) => (value, threshold),
            _ => {
                return RuleResult::fail(
                    &self.name,
                    self.severity,
                    self.message.clone(),
                    Some(json!({
                        "reason": NON_NUMERIC,
                        "field": self.field,
                        "value": raw,
                    })),
                );
            }
        };

        let passed = compare(&self.operator, value, threshold);
        let details = json!({
            "field": self.field,
            "value": value,
            "operator": self.operator,
            "threshold": threshold,
        });
        if passed {
            RuleResult::pass(&self.name, self.severity, Some(details))
        } else {
            RuleResult::fail(&self.name, self.severity, self.message.clone(), Some(details))
        }
    }
}

/// Numeric comparison between two fields of the record.
///
/// Unlike [`ValueComparisonRule`], an absent or non-numeric field on
/// either side fails with reason `non_numeric`. The asymmetry is
/// deliberate: a cross-field invariant is meaningless with half its
/// input missing.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldComparisonRule {
    pub name: String,
    pub left_field: String,
    /// One of `lt`, `lte`, `gt`, `gte`, `eq`, `neq`.
    pub operator: String,
    pub right_field: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub when: Option<Condition>,
}

impl FieldComparisonRule {
    pub fn apply(&self, record: &Value) -> RuleResult {
        let left_raw = resolve(record, &self.left_field);
        let right_raw = resolve(record, &self.right_field);

        let left = left_raw.and_then(as_number);
        let right = right_raw.and_then(as_number);
        let (left, right) = match (left, right) {
            (Some(left), Some(right)) => (left, right),
            _ => {
                return RuleResult::fail(
                    &self.name,
                    self.severity,
                    self.message.clone(),
                    Some(json!({
                        "reason": NON_NUMERIC,
                        "left_field": self.left_field,
                        "left_value": left_raw.cloned().unwrap_or(Value::Null),
                        "right_field": self.right_field,
                        "right_value": right_raw.cloned().unwrap_or(Value::Null),
                    })),
                );
            }
        };

        let passed = compare(&self.operator, left, right);
        let details = json!({
            "left_field": self.left_field,
            "left_value": left,
            "operator": self.operator,
            "right_field": self.right_field,
            "right_value": right,
        });
        if passed {
            RuleResult::pass(&self.name, self.severity, Some(details))
        } else {
            RuleResult::fail(&self.name, self.severity, self.message.clone(), Some(details))
        }
    }
}

/// The resolved value must be a member of the allowed set.
///
/// Membership is type-sensitive; an absent field resolves as `null` and
/// is therefore a member only if the set itself contains `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueInSetRule {
    pub name: String,
    pub field: String,
    pub allowed_values: Vec<Value>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub when: Option<Condition>,
}

impl ValueInSetRule {
    pub fn apply(&self, record: &Value) -> RuleResult {
        let value = resolve(record, &self.field)
            .cloned()
            .unwrap_or(Value::Null);
        let passed = self.allowed_values.contains(&value);
        let details = json!({
            "field": self.field,
            "value": value,
            "allowed_values": self.allowed_values,
        });
        if passed {
            RuleResult::pass(&self.name, self.severity, Some(details))
        } else {
            RuleResult::fail(&self.name, self.severity, self.message.clone(), Some(details))
        }
    }
}

/// Every listed path must resolve to a non-absent, non-empty value.
///
/// Typically paired with a `when` guard: IF the condition holds, THEN
/// the listed fields are required.
#[derive(Debug, Clone, Deserialize)]
pub struct RequiresRule {
    pub name: String,
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub when: Option<Condition>,
}

impl RequiresRule {
    pub fn apply(&self, record: &Value) -> RuleResult {
        let missing: Vec<&str> = self
            .required_fields
            .iter()
            .filter(|path| is_blank(resolve(record, path)))
            .map(|path| path.as_str())
            .collect();

        if missing.is_empty() {
            RuleResult::pass(&self.name, self.severity, None)
        } else {
            RuleResult::fail(
                &self.name,
                self.severity,
                self.message.clone(),
                Some(json!({"missing_fields": missing})),
            )
        }
    }
}

/// The closed set of rule variants, selected once at configuration load
/// by the document's `type` discriminant.
///
/// Adding a variant is a compile-time-checked, exhaustive change: every
/// `match` below must be extended.
#[derive(Debug, Clone)]
pub enum RuleDefinition {
    Presence(PresenceRule),
    StringMatch(StringMatchRule),
    ValueComparison(ValueComparisonRule),
    FieldComparison(FieldComparisonRule),
    ValueInSet(ValueInSetRule),
    Requires(RequiresRule),
}

impl RuleDefinition {
    /// The rule's unique name.
    pub fn name(&self) -> &str {
        match self {
            Self::Presence(r) => &r.name,
            Self::StringMatch(r) => &r.name,
            Self::ValueComparison(r) => &r.name,
            Self::FieldComparison(r) => &r.name,
            Self::ValueInSet(r) => &r.name,
            Self::Requires(r) => &r.name,
        }
    }

    /// The rule's configured severity.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Presence(r) => r.severity,
            Self::StringMatch(r) => r.severity,
            Self::ValueComparison(r) => r.severity,
            Self::FieldComparison(r) => r.severity,
            Self::ValueInSet(r) => r.severity,
            Self::Requires(r) => r.severity,
        }
    }

    /// The rule's optional guard.
    pub fn when(&self) -> Option<&Condition> {
        match self {
            Self::Presence(r) => r.when.as_ref(),
            Self::StringMatch(r) => r.when.as_ref(),
            Self::ValueComparison(r) => r.when.as_ref(),
            Self::FieldComparison(r) => r.when.as_ref(),
            Self::ValueInSet(r) => r.when.as_ref(),
            Self::Requires(r) => r.when.as_ref(),
        }
    }

    /// Evaluate the rule against a record, producing exactly one result.
    pub fn apply(&self, record: &Value) -> RuleResult {
        match self {
            Self::Presence(r) => r.apply(record),
            Self::StringMatch(r) => r.apply(record),
            Self::ValueComparison(r) => r.apply(record),
            Self::FieldComparison(r) => r.apply(record),
            Self::ValueInSet(r) => r.apply(record),
            Self::Requires(r) => r.apply(record),
        }
    }
}

/// Absent, null, or empty-string — the values presence-style checks reject.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// String form of a value for pattern matching: strings as-is, everything
/// else via its JSON rendering.
fn text_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a value to a number: JSON numbers, numeric strings, and
/// booleans (1/0). Everything else is non-numeric.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Apply a comparison operator. Unrecognized operators compare false, so
/// a misconfigured operator surfaces as a rule failure at evaluation time.
fn compare(operator: &str, left: f64, right: f64) -> bool {
    match operator {
        "lt" => left < right,
        "lte" => left <= right,
        "gt" => left > right,
        "gte" => left >= right,
        "eq" => left == right,
        "neq" => left != right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn presence(field: &str) -> PresenceRule {
        PresenceRule {
            name: "presence".to_string(),
            field: field.to_string(),
            severity: Severity::Error,
            message: Some("required".to_string()),
            when: None,
        }
    }

    #[test]
    fn test_presence_rejects_absent_null_and_empty() {
        let rule = presence("studentInfo.firstName");

        assert!(!rule.apply(&json!({})).passed);
        assert!(!rule.apply(&json!({"studentInfo": {"firstName": null}})).passed);
        assert!(!rule.apply(&json!({"studentInfo": {"firstName": ""}})).passed);
    }

    #[test]
    fn test_presence_accepts_zero_and_false() {
        let rule = presence("count");
        assert!(rule.apply(&json!({"count": 0})).passed);
        assert!(rule.apply(&json!({"count": false})).passed);
    }

    #[test]
    fn test_presence_failure_carries_message_and_details() {
        let rule = presence("name");
        let result = rule.apply(&json!({}));
        assert_eq!(result.message.as_deref(), Some("required"));
        assert_eq!(result.details, Some(json!({"field": "name", "value": null})));
    }

    fn ssn_rule() -> StringMatchRule {
        StringMatchRule {
            name: "ssn_format".to_string(),
            field: "studentInfo.ssn".to_string(),
            pattern: MatchPattern::new(r"\d{9}").unwrap(),
            severity: Severity::Error,
            message: Some("must be 9 digits".to_string()),
            when: None,
        }
    }

    #[test]
    fn test_string_match_full_string_only() {
        let rule = ssn_rule();
        assert!(rule.apply(&json!({"studentInfo": {"ssn": "123456789"}})).passed);
        // A substring match is not enough
        assert!(!rule.apply(&json!({"studentInfo": {"ssn": "123456789x"}})).passed);
        assert!(!rule.apply(&json!({"studentInfo": {"ssn": "invalid"}})).passed);
    }

    #[test]
    fn test_string_match_absent_field_is_vacuous_pass() {
        let rule = ssn_rule();
        let result = rule.apply(&json!({}));
        assert!(result.passed);
        assert!(result.message.is_none());
        assert_eq!(
            result.details,
            Some(json!({
                "reason": "field_missing_treated_as_pass",
                "field": "studentInfo.ssn"
            }))
        );
    }

    #[test]
    fn test_string_match_coerces_non_strings() {
        let rule = StringMatchRule {
            name: "zip".to_string(),
            field: "zip".to_string(),
            pattern: MatchPattern::new(r"\d{5}").unwrap(),
            severity: Severity::Error,
            message: None,
            when: None,
        };
        assert!(rule.apply(&json!({"zip": 90210})).passed);
    }

    fn age_rule(operator: &str, value: Value) -> ValueComparisonRule {
        ValueComparisonRule {
            name: "age_minimum".to_string(),
            field: "studentInfo.age".to_string(),
            operator: operator.to_string(),
            value,
            severity: Severity::Error,
            message: Some("too young".to_string()),
            when: None,
        }
    }

    #[test]
    fn test_value_comparison_operators() {
        let record = json!({"studentInfo": {"age": 18}});
        assert!(age_rule("gte", json!(14)).apply(&record).passed);
        assert!(age_rule("gt", json!(14)).apply(&record).passed);
        assert!(age_rule("eq", json!(18)).apply(&record).passed);
        assert!(age_rule("neq", json!(14)).apply(&record).passed);
        assert!(!age_rule("lt", json!(14)).apply(&record).passed);
        assert!(!age_rule("lte", json!(14)).apply(&record).passed);
    }

    #[test]
    fn test_value_comparison_absent_field_is_vacuous_pass() {
        let result = age_rule("gte", json!(14)).apply(&json!({}));
        assert!(result.passed);
        assert_eq!(
            result.details.as_ref().and_then(|d| d.get("reason")),
            Some(&json!("field_missing_treated_as_pass"))
        );
    }

    #[test]
    fn test_value_comparison_coerces_numeric_strings() {
        let record = json!({"studentInfo": {"age": "18"}});
        assert!(age_rule("gte", json!(14)).apply(&record).passed);
    }

    #[test]
    fn test_value_comparison_non_numeric_fails() {
        let result = age_rule("gte", json!(14)).apply(&json!({"studentInfo": {"age": "abc"}}));
        assert!(!result.passed);
        assert_eq!(
            result.details.as_ref().and_then(|d| d.get("reason")),
            Some(&json!("non_numeric"))
        );
        assert_eq!(result.message.as_deref(), Some("too young"));
    }

    #[test]
    fn test_value_comparison_unknown_operator_fails() {
        let result = age_rule("between", json!(14)).apply(&json!({"studentInfo": {"age": 18}}));
        assert!(!result.passed);
    }

    fn college_rule() -> FieldComparisonRule {
        FieldComparisonRule {
            name: "college_not_exceed_household".to_string(),
            left_field: "household.numberInCollege".to_string(),
            operator: "lte".to_string(),
            right_field: "household.numberInHousehold".to_string(),
            severity: Severity::Error,
            message: Some("too many in college".to_string()),
            when: None,
        }
    }

    #[test]
    fn test_field_comparison() {
        let rule = college_rule();
        assert!(rule
            .apply(&json!({"household": {"numberInCollege": 1, "numberInHousehold": 4}}))
            .passed);
        assert!(!rule
            .apply(&json!({"household": {"numberInCollege": 10, "numberInHousehold": 4}}))
            .passed);
    }

    #[test]
    fn test_field_comparison_absent_field_fails() {
        // Asymmetric with ValueComparison on purpose: one side missing is a
        // failure, not a vacuous pass.
        let result = college_rule().apply(&json!({"household": {"numberInHousehold": 4}}));
        assert!(!result.passed);
        let details = result.details.unwrap();
        assert_eq!(details.get("reason"), Some(&json!("non_numeric")));
        assert_eq!(details.get("left_value"), Some(&json!(null)));
        assert_eq!(details.get("right_value"), Some(&json!(4)));
    }

    fn state_rule() -> ValueInSetRule {
        ValueInSetRule {
            name: "state_code_valid".to_string(),
            field: "stateOfResidence".to_string(),
            allowed_values: vec![json!("CA"), json!("NY"), json!("TX")],
            severity: Severity::Error,
            message: Some("invalid state".to_string()),
            when: None,
        }
    }

    #[test]
    fn test_value_in_set_membership() {
        let rule = state_rule();
        assert!(rule.apply(&json!({"stateOfResidence": "CA"})).passed);
        assert!(!rule.apply(&json!({"stateOfResidence": "XX"})).passed);
    }

    #[test]
    fn test_value_in_set_membership_is_type_sensitive() {
        let rule = ValueInSetRule {
            name: "code".to_string(),
            field: "code".to_string(),
            allowed_values: vec![json!(1), json!(2)],
            severity: Severity::Error,
            message: None,
            when: None,
        };
        assert!(rule.apply(&json!({"code": 1})).passed);
        assert!(!rule.apply(&json!({"code": "1"})).passed);
    }

    #[test]
    fn test_value_in_set_absent_field_fails() {
        assert!(!state_rule().apply(&json!({})).passed);
    }

    #[test]
    fn test_value_in_set_null_member_matches_absent() {
        let rule = ValueInSetRule {
            name: "optional_code".to_string(),
            field: "code".to_string(),
            allowed_values: vec![json!(null), json!("A")],
            severity: Severity::Error,
            message: None,
            when: None,
        };
        assert!(rule.apply(&json!({})).passed);
    }

    fn spouse_rule() -> RequiresRule {
        RequiresRule {
            name: "married_requires_spouse_info".to_string(),
            required_fields: vec!["spouseInfo.name".to_string(), "spouseInfo.ssn".to_string()],
            severity: Severity::Error,
            message: Some("spouse info required".to_string()),
            when: None,
        }
    }

    #[test]
    fn test_requires_collects_missing_fields() {
        let result = spouse_rule().apply(&json!({"spouseInfo": {"name": "Jane", "ssn": ""}}));
        assert!(!result.passed);
        assert_eq!(
            result.details,
            Some(json!({"missing_fields": ["spouseInfo.ssn"]}))
        );
    }

    #[test]
    fn test_requires_success_has_no_details() {
        let result = spouse_rule().apply(&json!({"spouseInfo": {"name": "Jane", "ssn": "987654321"}}));
        assert!(result.passed);
        assert!(result.details.is_none());
    }

    #[test]
    fn test_match_pattern_rejects_invalid_regex() {
        assert!(MatchPattern::new(r"(unclosed").is_err());
    }

    #[test]
    fn test_as_number_coercions() {
        assert_eq!(as_number(&json!(1.5)), Some(1.5));
        assert_eq!(as_number(&json!(" 42 ")), Some(42.0));
        assert_eq!(as_number(&json!(true)), Some(1.0));
        assert_eq!(as_number(&json!(false)), Some(0.0));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!(null)), None);
        assert_eq!(as_number(&json!({})), None);
    }
}
