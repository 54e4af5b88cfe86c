//! In-memory catalog
//!
//! The dataset is read once at startup into a [`Catalog`] and never mutated.
//! Callers share it behind an `Arc`; every operation here is a bounded scan
//! that hands back borrowed views into the catalog.

mod query;
mod resolver;
mod timestamp;

pub use query::{parse_limit, ListMetadata, ListQuery, ServerList, DEFAULT_LIMIT, MAX_LIMIT};
pub use resolver::{decode_token, NameMatch, LATEST_TOKEN};
pub use timestamp::parse_timestamp;

use std::path::Path;
use tracing::{info, warn};

use crate::error::{DatasetError, RegistryError};
use crate::registry::{parse_dataset, validate_entries, ServerResponse};

/// Read-only collection of registry records, in dataset order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<ServerResponse>,
}

impl Catalog {
    pub fn new(entries: Vec<ServerResponse>) -> Self {
        Self { entries }
    }

    /// Load the dataset file. Any failure here means the process cannot serve.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&json)?;
        info!(
            "[Registry] Loaded {} servers from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse a dataset document and report (but tolerate) structural issues
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let entries = parse_dataset(json)?;
        for issue in validate_entries(&entries) {
            warn!("[Registry] Dataset issue: {}", issue);
        }
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[ServerResponse] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `GET /servers`: filter, then truncate
    pub fn list(&self, query: &ListQuery) -> ServerList<'_> {
        query.apply(&self.entries)
    }

    /// `GET /servers/{name}/versions`: every record matching the name
    pub fn versions(&self, name_token: &str) -> Result<ServerList<'_>, RegistryError> {
        let found = self.resolve(name_token)?;
        Ok(ServerList::unpaged(found.entries))
    }

    /// `GET /servers/{name}/versions/latest`
    pub fn latest(&self, name_token: &str) -> Result<&ServerResponse, RegistryError> {
        let found = self.resolve(name_token)?;
        found.latest().ok_or_else(|| RegistryError::NotFound {
            name: found.token.clone(),
        })
    }

    /// `GET /servers/{name}/versions/{version}`; the token `latest` delegates to [`Catalog::latest`]
    pub fn version(
        &self,
        name_token: &str,
        version_token: &str,
    ) -> Result<&ServerResponse, RegistryError> {
        let version = decode_token(version_token);
        if version == LATEST_TOKEN {
            return self.latest(name_token);
        }

        let found = self.resolve(name_token)?;
        found
            .with_version(&version)
            .ok_or_else(|| RegistryError::VersionNotFound {
                name: found.token.clone(),
                version: version.into_owned(),
            })
    }

    fn resolve(&self, name_token: &str) -> Result<NameMatch<'_>, RegistryError> {
        let found = NameMatch::resolve(&self.entries, name_token);
        if found.entries.is_empty() {
            return Err(RegistryError::NotFound { name: found.token });
        }
        Ok(found)
    }
}
