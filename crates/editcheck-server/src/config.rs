//! Server configuration management

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, ServerError};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listener settings
    pub server: ServerSettings,

    /// Rule set configuration
    pub rules: RulesConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Rule set configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Path to the YAML rule document
    #[serde(default = "default_rules_path")]
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json: bool,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "editcheck-server")]
#[command(about = "HTTP server for editcheck rule evaluation")]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Server host
    #[arg(long, env = "EDITCHECK_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(short, long, env = "EDITCHECK_PORT")]
    pub port: Option<u16>,

    /// Path to the YAML rule document. The env name spells out the
    /// nested key (`rules.path`) so the layered `EDITCHECK` environment
    /// source parses it into the right section instead of clobbering
    /// the `rules` table with a string.
    #[arg(long, env = "EDITCHECK_RULES_PATH")]
    pub rules: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,
}

impl ServerConfig {
    /// Load configuration from defaults, file, environment, and CLI
    /// arguments, in increasing precedence.
    pub fn load(args: &Args) -> Result<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&Self::default())?);

        if let Some(config_path) = &args.config {
            builder = builder.add_source(config::File::from(config_path.clone()));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("EDITCHECK")
                .separator("_")
                .try_parsing(true),
        );

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        if let Some(host) = &args.host {
            config.server.host = host.clone();
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if let Some(rules) = &args.rules {
            config.rules.path = rules.clone();
        }
        if let Some(log_level) = &args.log_level {
            config.logging.level = log_level.clone();
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config(config::ConfigError::Message(
                "Server port must be greater than 0".to_string(),
            )));
        }

        if self.rules.path.as_os_str().is_empty() {
            return Err(ServerError::Config(config::ConfigError::Message(
                "Rule document path is required".to_string(),
            )));
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            rules: RulesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout: default_timeout(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: default_rules_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    30
}
fn default_rules_path() -> PathBuf {
    PathBuf::from("config/rules.yaml")
}
fn default_log_level() -> String {
    "info".to_string()
}
