//! MCP Server Registry
//!
//! This module defines the schema for registry records.
//! Records are loaded from a local JSON file in either the current
//! `{server, _meta}` envelope or the older flat record shape.

mod schema;
mod types;
mod validation;

pub use schema::*;
pub use types::*;
pub use validation::*;
