//! The validation engine: transforms, guarded rule evaluation, and
//! summary assembly.

use std::path::Path;

use serde_json::{json, Value};
use tracing::debug;

use editcheck_core::{assign, resolve, RuleResult, ValidationSummary};

use crate::config::RuleSet;
use crate::error::ConfigResult;
use crate::transform::TransformRegistry;

/// An immutable rule evaluator.
///
/// Built once from a [`RuleSet`]; `validate` takes `&self` and touches
/// no shared state, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    rule_set: RuleSet,
    registry: TransformRegistry,
}

impl ValidationEngine {
    /// Build an engine over a rule set, using the built-in transforms.
    pub fn new(rule_set: RuleSet) -> Self {
        Self::with_registry(rule_set, TransformRegistry::with_builtins())
    }

    /// Build an engine with a caller-supplied transform registry.
    pub fn with_registry(rule_set: RuleSet, registry: TransformRegistry) -> Self {
        Self { rule_set, registry }
    }

    /// Parse a YAML rule document and build an engine from it.
    pub fn from_yaml_str(source: &str) -> ConfigResult<Self> {
        Ok(Self::new(RuleSet::from_yaml_str(source)?))
    }

    /// Load a YAML rule document from disk and build an engine from it.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Ok(Self::new(RuleSet::from_yaml_file(path)?))
    }

    /// The number of rules this engine evaluates per record.
    pub fn rule_count(&self) -> usize {
        self.rule_set.rules.len()
    }

    /// Evaluate every rule against a record.
    ///
    /// The caller's record is never modified: transforms are applied to
    /// a working copy, which is what the rules see. Evaluation is
    /// infallible — data problems become failed results, not errors.
    pub fn validate(&self, record: &Value) -> ValidationSummary {
        let mut working = record.clone();
        self.apply_transforms(&mut working);

        let results: Vec<RuleResult> = self
            .rule_set
            .rules
            .iter()
            .map(|rule| match rule.when() {
                Some(condition) if !condition.holds(&working) => RuleResult::pass(
                    rule.name(),
                    rule.severity(),
                    Some(json!({"reason": "condition_not_met"})),
                ),
                _ => rule.apply(&working),
            })
            .collect();

        ValidationSummary::from_results(results)
    }

    fn apply_transforms(&self, working: &mut Value) {
        for definition in &self.rule_set.transforms {
            let Some(function) = self.registry.get(&definition.transform) else {
                debug!(
                    name = %definition.name,
                    transform = %definition.transform,
                    "unknown transform, skipping"
                );
                continue;
            };
            let derived = function(resolve(working, &definition.field));
            // Null results are assigned too, so rules observe the field
            // as present-but-null rather than absent.
            assign(working, &definition.output_field, derived);
        }
    }
}
