//! Shared application state

use editcheck_engine::ValidationEngine;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::Result;

/// State shared by all request handlers.
///
/// The engine is immutable after startup, so handlers validate
/// concurrently without any locking.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: ValidationEngine,
}

impl AppState {
    /// Build the state from configuration, loading the rule document
    /// from disk. Any rule configuration problem aborts startup.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let engine = ValidationEngine::from_yaml_file(&config.rules.path)?;
        info!(
            rules = engine.rule_count(),
            path = %config.rules.path.display(),
            "Loaded rule configuration"
        );
        Ok(Self { engine })
    }
}
