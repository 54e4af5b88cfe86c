//! Build script that generates branding constants from branding.toml
//!
//! This reads the workspace-level branding.toml and generates Rust constants
//! that are included at compile time.

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Re-run if branding.toml changes
    println!("cargo:rerun-if-changed=../../branding.toml");

    // Find branding.toml relative to this crate (2 levels up to workspace root)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    let branding_path = workspace_root.join("branding.toml");

    let content = fs::read_to_string(&branding_path).unwrap_or_default();

    let display_name = extract_toml_string(&content, "display_name").unwrap_or("MCP Registry Demo");
    let api_version = extract_toml_string(&content, "api_version").unwrap_or("v0.1");
    let log_prefix = extract_toml_string(&content, "log_prefix").unwrap_or("mcpreg");
    let server_schema_url = extract_toml_string(&content, "server_schema_url").unwrap_or(
        "https://static.modelcontextprotocol.io/schemas/2025-09-29/server.schema.json",
    );
    let default_port: u16 = extract_toml_string(&content, "default_port")
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let out_dir = env::var("OUT_DIR").unwrap();
    let rust_path = Path::new(&out_dir).join("branding_generated.rs");

    let rust_code = format!(
        r#"// Auto-generated branding constants from branding.toml
// DO NOT EDIT - regenerate with `cargo build`

/// User-facing registry name (reported by `GET /`)
pub const DISPLAY_NAME: &str = {display_name:?};

/// API version segment used in every route (e.g. "v0.1")
pub const API_VERSION: &str = {api_version:?};

/// Log file prefix
pub const LOG_PREFIX: &str = {log_prefix:?};

/// `$schema` URL stamped on legacy registry documents
pub const SERVER_SCHEMA_URL: &str = {server_schema_url:?};

/// Port the HTTP server binds when none is configured
pub const DEFAULT_PORT: u16 = {default_port};
"#,
    );

    fs::write(&rust_path, rust_code).expect("Failed to write branding_generated.rs");
}

/// Extract a string value from TOML content (simple parser, no dependencies)
fn extract_toml_string<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    for line in content.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(key) else {
            continue;
        };
        let Some(value) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let value = value.trim();
        if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
            return Some(&value[1..value.len() - 1]);
        }
    }
    None
}
