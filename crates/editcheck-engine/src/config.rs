//! YAML rule document loading.
//!
//! The document is a flat `rules:` list in which transform entries and
//! rule entries are interleaved; the `type` key selects the variant at
//! load time. Declaration order is preserved within each of the two
//! groups, since it determines both transform application order and the
//! order of results in a summary.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigResult;
use crate::rule::{
    FieldComparisonRule, PresenceRule, RequiresRule, RuleDefinition, StringMatchRule,
    ValueComparisonRule, ValueInSetRule,
};
use crate::transform::TransformDefinition;

/// One entry of the `rules:` list, discriminated by its `type` key.
///
/// An unrecognized `type` (or a missing required field, or an invalid
/// pattern) fails deserialization of the whole document; configuration
/// errors are never deferred to evaluation time.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ConfigEntry {
    Transform(TransformDefinition),
    Presence(PresenceRule),
    StringMatch(StringMatchRule),
    ValueComparison(ValueComparisonRule),
    FieldComparison(FieldComparisonRule),
    ValueInSet(ValueInSetRule),
    Requires(RequiresRule),
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    rules: Vec<ConfigEntry>,
}

/// A parsed rule configuration: transforms and rules, each in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub transforms: Vec<TransformDefinition>,
    pub rules: Vec<RuleDefinition>,
}

impl RuleSet {
    /// Parse a YAML rule document.
    ///
    /// An empty document and a document with an empty `rules:` list both
    /// produce an empty rule set.
    pub fn from_yaml_str(source: &str) -> ConfigResult<Self> {
        let document = serde_yaml::from_str::<Option<Document>>(source)?;
        Ok(match document {
            Some(document) => Self::partition(document.rules),
            None => Self::default(),
        })
    }

    /// Read and parse a YAML rule document from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    fn partition(entries: Vec<ConfigEntry>) -> Self {
        let mut transforms = Vec::new();
        let mut rules = Vec::new();
        for entry in entries {
            match entry {
                ConfigEntry::Transform(t) => transforms.push(t),
                ConfigEntry::Presence(r) => rules.push(RuleDefinition::Presence(r)),
                ConfigEntry::StringMatch(r) => rules.push(RuleDefinition::StringMatch(r)),
                ConfigEntry::ValueComparison(r) => rules.push(RuleDefinition::ValueComparison(r)),
                ConfigEntry::FieldComparison(r) => rules.push(RuleDefinition::FieldComparison(r)),
                ConfigEntry::ValueInSet(r) => rules.push(RuleDefinition::ValueInSet(r)),
                ConfigEntry::Requires(r) => rules.push(RuleDefinition::Requires(r)),
            }
        }
        Self { transforms, rules }
    }
}
