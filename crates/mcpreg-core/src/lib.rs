//! # McpReg Core Library
//!
//! Data model and read-only query logic for the MCP registry.
//!
//! ## Modules
//!
//! - `branding` - Centralized naming constants (generated from branding.toml)
//! - `registry` - Server record schema, legacy record migration and validation
//! - `catalog` - The in-memory dataset plus name resolution and list queries
//! - `info` - The API info document served at the root
//! - `error` - Dataset and lookup errors

pub mod branding;
pub mod catalog;
pub mod error;
pub mod info;
pub mod registry;

pub use catalog::{Catalog, ListMetadata, ListQuery, NameMatch, ServerList};
pub use error::{DatasetError, RegistryError};
pub use info::{api_info, ApiInfo};
pub use registry::{OfficialMeta, Package, ResponseMeta, ServerDetail, ServerResponse, Transport};
