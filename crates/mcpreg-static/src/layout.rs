//! On-disk layout of the exported site
//!
//! Every endpoint maps to a directory holding a single [`INDEX_FILE`], so a
//! static host serving directory indexes answers the same URLs as the API.

use anyhow::{bail, Result};
use mcpreg_core::branding;
use std::path::PathBuf;

/// File written at every endpoint path
pub const INDEX_FILE: &str = "index.json";

pub struct ExportLayout;

impl ExportLayout {
    /// `/`
    pub fn root() -> PathBuf {
        PathBuf::from(INDEX_FILE)
    }

    /// `/v0.1/servers`
    pub fn servers() -> PathBuf {
        Self::servers_dir().join(INDEX_FILE)
    }

    /// `/v0.1/servers/{name}/versions`
    pub fn versions(short_name: &str) -> Result<PathBuf> {
        Ok(Self::versions_dir(short_name)?.join(INDEX_FILE))
    }

    /// `/v0.1/servers/{name}/versions/{version}`
    pub fn version(short_name: &str, version: &str) -> Result<PathBuf> {
        Ok(Self::versions_dir(short_name)?
            .join(checked_segment(version)?)
            .join(INDEX_FILE))
    }

    fn servers_dir() -> PathBuf {
        PathBuf::from(branding::API_VERSION).join("servers")
    }

    fn versions_dir(short_name: &str) -> Result<PathBuf> {
        Ok(Self::servers_dir()
            .join(checked_segment(short_name)?)
            .join("versions"))
    }
}

/// A name or version must stay a single directory below its parent
fn checked_segment(segment: &str) -> Result<&str> {
    let unsafe_segment = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);
    if unsafe_segment {
        bail!("Refusing to export unsafe path segment {:?}", segment);
    }
    Ok(segment)
}
