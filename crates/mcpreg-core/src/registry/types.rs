//! Core types for the MCP Server Registry

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the registry-owned entry inside `_meta`
pub const OFFICIAL_META_KEY: &str = "io.modelcontextprotocol.registry/official";

/// Transport descriptor, used both for package transports and for remotes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transport {
    /// Transport type (e.g. "stdio", "streamable-http", "sse")
    #[serde(rename = "type")]
    pub transport_type: String,

    /// Endpoint URL for remote transports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Fields this registry does not interpret (headers, variables, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transport {
    pub fn new(transport_type: impl Into<String>, url: Option<String>) -> Self {
        Self {
            transport_type: transport_type.into(),
            url,
            extra: Map::new(),
        }
    }
}

/// A distributable package of a server (npm, pypi, oci, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package registry type (e.g. "npm", "pypi", "oci")
    pub registry_type: String,

    /// Package identifier within that registry
    pub identifier: String,

    /// Package version, when it differs from the server version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// How a client talks to the installed package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Source repository of a server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub url: String,

    /// Hosting service (e.g. "github")
    pub source: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The canonical registry record for one version of one server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerDetail {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Namespaced name, e.g. "io.github.org/tool-name"
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Human-readable display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Semver-like version string (compared as an opaque string)
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<Package>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<Transport>,

    /// Search tags (only carried by migrated legacy records)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerDetail {
    /// Last path segment of the name ("io.github.org/tool" -> "tool")
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Name with `/` and `.` both replaced by `-`, the URL-safe fallback encoding
    pub fn dashed_name(&self) -> String {
        dashed(&self.name)
    }
}

/// Replace `/` and `.` with `-`
pub fn dashed(name: &str) -> String {
    name.replace(['/', '.'], "-")
}

/// Registry-owned metadata for a record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfficialMeta {
    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Whether this is the recommended version among records sharing a name
    #[serde(default)]
    pub is_latest: bool,
}

impl Default for OfficialMeta {
    fn default() -> Self {
        Self {
            status: default_status(),
            published_at: None,
            updated_at: None,
            is_latest: false,
        }
    }
}

pub(crate) fn default_status() -> String {
    "active".to_string()
}

/// The `_meta` envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ResponseMeta {
    #[serde(rename = "io.modelcontextprotocol.registry/official", default)]
    pub official: OfficialMeta,

    /// Metadata published under other namespaces
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A record as served by the API: the server plus its registry metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerResponse {
    pub server: ServerDetail,

    #[serde(rename = "_meta", default)]
    pub meta: ResponseMeta,
}

impl ServerResponse {
    pub fn name(&self) -> &str {
        &self.server.name
    }

    pub fn version(&self) -> &str {
        &self.server.version
    }

    pub fn is_latest(&self) -> bool {
        self.meta.official.is_latest
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.meta.official.updated_at.as_deref()
    }
}
