//! Centralized branding constants
//!
//! All product naming comes from this module.
//! Generated from branding.toml at build time.
//!
//! # Usage
//!
//! ```rust
//! use mcpreg_core::branding;
//!
//! println!("Registry: {}", branding::DISPLAY_NAME);
//! assert_eq!(branding::api_path("/servers"), "/v0.1/servers");
//! ```

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/branding_generated.rs"));

/// Prefix a path with the API version segment
///
/// # Example
/// ```ignore
/// let path = branding::api_path("/servers");
/// // Returns: "/v0.1/servers"
/// ```
pub fn api_path(path: &str) -> String {
    format!("/{}/{}", API_VERSION, path.trim_start_matches('/'))
}
