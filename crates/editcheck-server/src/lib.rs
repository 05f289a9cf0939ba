//! Editcheck HTTP Server
//!
//! A thin HTTP layer over the rule evaluation engine:
//! - `GET /health` for liveness probes
//! - `POST /validate` to evaluate an application record against the
//!   configured rule set
//!
//! The rule set is loaded once at startup; a configuration problem is a
//! startup failure, never a request-time one.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::AppState;
