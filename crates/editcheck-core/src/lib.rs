//! # Editcheck Core
//!
//! Core data structures for editcheck rule validation.
//!
//! This crate provides the fundamental types shared by the rule engine and
//! its callers: [`Severity`], [`Condition`], [`RuleResult`],
//! [`ValidationSummary`], and the dotted field path resolver used by every
//! rule variant.

pub mod condition;
pub mod path;
pub mod result;
pub mod severity;

pub use condition::Condition;
pub use path::{assign, resolve};
pub use result::{RuleResult, ValidationSummary};
pub use severity::Severity;
