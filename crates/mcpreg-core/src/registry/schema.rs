//! Dataset document schema
//!
//! Supports both record formats:
//! - **Envelope**: `{ "server": { "name": "io.github.xxx/yyy", ... }, "_meta": { ... } }`
//! - **Legacy flat**: `{ "id": "io.github.xxx/yyy", "name": "...", "updated_at": "...", "isLatest": true }`
//!
//! and both document layouts: a bare array of records, or `{ "servers": [...] }`.
//! Legacy records are migrated to the envelope at load time so the rest of
//! the crate only ever sees [`ServerResponse`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::*;
use crate::branding;
use crate::error::DatasetError;

/// Parse a dataset document into canonical records, preserving document order
pub fn parse_dataset(json: &str) -> Result<Vec<ServerResponse>, DatasetError> {
    let document: Value = serde_json::from_str(json)?;

    let records = match document {
        Value::Array(records) => records,
        Value::Object(mut obj) => match obj.remove("servers") {
            Some(Value::Array(records)) => records,
            _ => return Err(DatasetError::UnsupportedShape),
        },
        _ => return Err(DatasetError::UnsupportedShape),
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| normalize_record(index, record))
        .collect()
}

fn normalize_record(index: usize, record: Value) -> Result<ServerResponse, DatasetError> {
    let invalid = |e: serde_json::Error| DatasetError::InvalidRecord {
        index,
        reason: e.to_string(),
    };

    if !record.is_object() {
        return Err(DatasetError::InvalidRecord {
            index,
            reason: "record must be a JSON object".to_string(),
        });
    }

    if record.get("server").is_some() {
        serde_json::from_value::<ServerResponse>(record).map_err(invalid)
    } else {
        serde_json::from_value::<LegacyServer>(record)
            .map(LegacyServer::into_response)
            .map_err(invalid)
    }
}

/// Flat record shape used by earlier versions of the dataset
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyServer {
    /// Namespaced identifier; when present this becomes the canonical name
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub version: String,

    #[serde(default)]
    pub packages: Vec<LegacyPackage>,

    #[serde(default)]
    pub remotes: Vec<Transport>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default, alias = "created_at")]
    pub published_at: Option<String>,

    #[serde(default, rename = "isLatest", alias = "is_latest")]
    pub is_latest: bool,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Package entry of a legacy record
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyPackage {
    #[serde(default, alias = "registry_name", alias = "registryType")]
    pub registry_type: Option<String>,

    #[serde(default, alias = "name")]
    pub identifier: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Source URL; legacy documents used this for the repository link
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub transport: Option<Transport>,
}

impl LegacyServer {
    /// Migrate to the canonical envelope
    pub fn into_response(self) -> ServerResponse {
        let (name, title) = match self.id {
            Some(id) if !id.is_empty() => {
                let title = (id != self.name).then_some(self.name);
                (id, title)
            }
            _ => (self.name, None),
        };

        let repository = self
            .packages
            .iter()
            .find_map(|p| p.url.clone())
            .map(|url| Repository {
                url,
                source: "github".to_string(),
                extra: Map::new(),
            });

        let packages = self
            .packages
            .into_iter()
            .map(|p| Package {
                registry_type: p.registry_type.unwrap_or_else(|| "npm".to_string()),
                identifier: p.identifier.unwrap_or_else(|| name.clone()),
                version: p.version,
                transport: p.transport,
                extra: Map::new(),
            })
            .collect();

        ServerResponse {
            server: ServerDetail {
                schema: None,
                name,
                description: self.description,
                title,
                version: self.version,
                repository,
                packages,
                remotes: self.remotes,
                tags: self.tags,
                extra: Map::new(),
            },
            meta: ResponseMeta {
                official: OfficialMeta {
                    status: self.status.unwrap_or_else(default_status),
                    published_at: self.published_at.or_else(|| self.updated_at.clone()),
                    updated_at: self.updated_at,
                    is_latest: self.is_latest,
                },
                extra: Map::new(),
            },
        }
    }
}

/// Backward-compatible `registry.json` document written next to the static export
#[derive(Debug, Clone, Serialize)]
pub struct LegacyRegistryDocument {
    pub servers: Vec<LegacyRegistryEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegacyRegistryEntry {
    pub server: LegacyRegistryServer,
    #[serde(rename = "_meta")]
    pub meta: LegacyRegistryMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegacyRegistryServer {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub description: String,
    pub repository: LegacyRepository,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegacyRepository {
    pub url: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegacyRegistryMeta {
    #[serde(rename = "io.modelcontextprotocol.registry/official")]
    pub official: OfficialMeta,
}

impl LegacyRegistryDocument {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ServerResponse>) -> Self {
        let servers = entries
            .into_iter()
            .map(|entry| {
                let server = &entry.server;
                let repository = match &server.repository {
                    Some(repo) => LegacyRepository {
                        url: repo.url.clone(),
                        source: repo.source.clone(),
                    },
                    None => LegacyRepository {
                        url: String::new(),
                        source: "github".to_string(),
                    },
                };

                let mut official = entry.meta.official.clone();
                if official.published_at.is_none() {
                    official.published_at = official.updated_at.clone();
                }

                LegacyRegistryEntry {
                    server: LegacyRegistryServer {
                        schema: server
                            .schema
                            .clone()
                            .unwrap_or_else(|| branding::SERVER_SCHEMA_URL.to_string()),
                        name: server.name.clone(),
                        description: server.description.clone(),
                        repository,
                        version: server.version.clone(),
                    },
                    meta: LegacyRegistryMeta { official },
                }
            })
            .collect();

        Self { servers }
    }
}
