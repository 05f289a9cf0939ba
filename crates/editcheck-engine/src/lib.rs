//! Editcheck Rule Evaluation Engine
//!
//! This crate evaluates a structured application record against a
//! declaratively configured set of edit rules and reports, per rule,
//! whether it passed and at what severity.
//!
//! A [`ValidationEngine`] is built once from a YAML rule document and is
//! immutable thereafter, so a single instance can serve any number of
//! concurrent `validate` calls without locking. Each call operates on a
//! private working copy of the caller's record: derived-field transforms
//! run first, then every rule is evaluated (subject to its optional
//! `when` guard), and the outcomes are classified into an immutable
//! [`ValidationSummary`](editcheck_core::ValidationSummary).

pub mod config;
pub mod engine;
pub mod error;
pub mod rule;
pub mod transform;

pub use config::RuleSet;
pub use engine::ValidationEngine;
pub use error::{ConfigError, ConfigResult};
pub use rule::{
    FieldComparisonRule, MatchPattern, PresenceRule, RequiresRule, RuleDefinition,
    StringMatchRule, ValueComparisonRule, ValueInSetRule,
};
pub use transform::{age_years, TransformDefinition, TransformFn, TransformRegistry};

// Re-export the shared result types for convenience
pub use editcheck_core::{Condition, RuleResult, Severity, ValidationSummary};
