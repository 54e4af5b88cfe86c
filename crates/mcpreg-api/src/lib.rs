//! McpReg API
//!
//! Read-only HTTP surface over the registry catalog:
//! - Server listing with search, update-time and version filters
//! - Latest / specific / all-versions lookup by name
//! - Permissive CORS for browser clients
//! - Request logging with trace ids
//! - JSON error bodies for unknown routes, lookups and handler panics

pub mod logging;
pub mod server;

pub use server::{ApiConfig, ApiError, AppState, ErrorBody, RegistryServer};
