//! Structural checks over a loaded dataset
//!
//! The loader does not reject records that break these rules; they are
//! reported so the dataset can be fixed, and serving continues.

use std::collections::HashMap;
use std::fmt;

use super::types::ServerResponse;

/// A rule broken by the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Record has neither packages nor remotes
    NoDistribution { name: String, version: String },
    /// More than one record of the same name is flagged latest
    MultipleLatest { name: String, versions: Vec<String> },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::NoDistribution { name, version } => {
                write!(f, "{}@{} has neither packages nor remotes", name, version)
            }
            ValidationIssue::MultipleLatest { name, versions } => write!(
                f,
                "{} has {} versions flagged latest: {}",
                name,
                versions.len(),
                versions.join(", ")
            ),
        }
    }
}

/// Validate loaded records, returning issues in dataset order
pub fn validate_entries(entries: &[ServerResponse]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut latest: Vec<(&str, Vec<String>)> = Vec::new();
    let mut latest_index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        if entry.server.packages.is_empty() && entry.server.remotes.is_empty() {
            issues.push(ValidationIssue::NoDistribution {
                name: entry.name().to_string(),
                version: entry.version().to_string(),
            });
        }

        if entry.is_latest() {
            let idx = *latest_index.entry(entry.name()).or_insert_with(|| {
                latest.push((entry.name(), Vec::new()));
                latest.len() - 1
            });
            latest[idx].1.push(entry.version().to_string());
        }
    }

    issues.extend(
        latest
            .into_iter()
            .filter(|(_, versions)| versions.len() > 1)
            .map(|(name, versions)| ValidationIssue::MultipleLatest {
                name: name.to_string(),
                versions,
            }),
    );

    issues
}
