//! Name resolution
//!
//! A name arrives as a URL path segment. It may be percent-encoded
//! (`io.github.acme%2Ffoo-tool`), dash-encoded (`io-github-acme-foo-tool`)
//! or just the short name (`foo-tool`). Matching is ranked:
//!
//! 1. exact: canonical name equals the resolved name
//! 2. suffix: canonical name ends with `/` + token
//! 3. substring: canonical name contains the token
//!
//! The first non-empty tier wins. Ties inside a tier keep dataset order, so
//! wherever a single record is needed the first one in load order is used.

use std::borrow::Cow;

use crate::registry::{dashed, ServerResponse};

/// Version token that selects the record flagged latest
pub const LATEST_TOKEN: &str = "latest";

/// Percent-decode a path token, keeping the raw token if it does not decode to UTF-8
pub fn decode_token(token: &str) -> Cow<'_, str> {
    urlencoding::decode(token).unwrap_or(Cow::Borrowed(token))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Exact,
    Suffix,
    Substring,
}

/// Records matching a name token
#[derive(Debug, Clone)]
pub struct NameMatch<'a> {
    /// The decoded token as the caller supplied it
    pub token: String,
    /// Canonical name the token resolved to (dash fallback applied)
    pub resolved: String,
    /// Matching records in dataset order
    pub entries: Vec<&'a ServerResponse>,
}

impl<'a> NameMatch<'a> {
    pub fn resolve(entries: &'a [ServerResponse], raw_token: &str) -> Self {
        let token = decode_token(raw_token).into_owned();
        let resolved = undash(entries, &token).unwrap_or_else(|| token.clone());

        let suffix = format!("/{}", token);
        let tier_of = |name: &str| {
            if name == resolved {
                Some(Tier::Exact)
            } else if name.ends_with(&suffix) {
                Some(Tier::Suffix)
            } else if name.contains(token.as_str()) {
                Some(Tier::Substring)
            } else {
                None
            }
        };

        let tiered: Vec<(Tier, &'a ServerResponse)> = entries
            .iter()
            .filter_map(|entry| tier_of(entry.name()).map(|tier| (tier, entry)))
            .collect();

        let best = tiered.iter().map(|(tier, _)| *tier).min();
        let entries = tiered
            .into_iter()
            .filter(|(tier, _)| Some(*tier) == best)
            .map(|(_, entry)| entry)
            .collect();

        Self {
            token,
            resolved,
            entries,
        }
    }

    /// The record flagged latest, else the first match
    pub fn latest(&self) -> Option<&'a ServerResponse> {
        self.entries
            .iter()
            .find(|entry| entry.is_latest())
            .or_else(|| self.entries.first())
            .copied()
    }

    /// The first match whose version equals `version` exactly
    pub fn with_version(&self, version: &str) -> Option<&'a ServerResponse> {
        self.entries
            .iter()
            .find(|entry| entry.version() == version)
            .copied()
    }
}

/// Map a dash-encoded token back to the canonical name it encodes
fn undash(entries: &[ServerResponse], token: &str) -> Option<String> {
    if token.contains('/') || !token.contains('-') {
        return None;
    }

    entries
        .iter()
        .find(|entry| dashed(entry.name()) == token)
        .map(|entry| entry.name().to_string())
}
