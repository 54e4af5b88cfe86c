//! List queries
//!
//! Filter pipeline, applied in order over the whole catalog:
//! search, then `updated_since`, then version, then truncation to the limit.
//! No sorting is applied; results keep dataset order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resolver::LATEST_TOKEN;
use super::timestamp::parse_timestamp;
use crate::registry::ServerResponse;

/// Page size when `limit` is absent or not a number
pub const DEFAULT_LIMIT: usize = 30;

/// Hard upper bound on the page size
pub const MAX_LIMIT: usize = 100;

/// Query string of `GET /servers`
///
/// Values are kept as raw strings; empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring over name, description, title and tags
    pub search: Option<String>,
    /// Requested page size
    pub limit: Option<String>,
    /// Only records updated strictly after this timestamp
    pub updated_since: Option<String>,
    /// Exact version, or `latest` for records flagged latest
    pub version: Option<String>,
}

/// Page of records plus list metadata
#[derive(Debug, Clone, Serialize)]
pub struct ServerList<'a> {
    pub servers: Vec<&'a ServerResponse>,
    pub metadata: ListMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListMetadata {
    /// Number of records that passed the filters, before truncation
    pub count: usize,

    /// Effective page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Name of the first record cut off by the limit. A hint only; it is
    /// not accepted back as a resume position.
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<'a> ServerList<'a> {
    /// A list without paging metadata (version listings)
    pub fn unpaged(servers: Vec<&'a ServerResponse>) -> Self {
        let count = servers.len();
        Self {
            servers,
            metadata: ListMetadata {
                count,
                limit: None,
                next_cursor: None,
            },
        }
    }
}

/// Parse a `limit` value the way a leading-integer parse does
///
/// `"10"` and `"10abc"` give 10; absent or non-numeric gives [`DEFAULT_LIMIT`].
/// The result is clamped to `0..=MAX_LIMIT`, so zero or negative values
/// produce an empty page.
pub fn parse_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_LIMIT;
    };

    let (negative, digits) = match raw.as_bytes()[0] {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return DEFAULT_LIMIT;
    }

    if negative {
        return 0;
    }

    digits
        .parse::<u64>()
        .map(|n| n.min(MAX_LIMIT as u64) as usize)
        .unwrap_or(MAX_LIMIT)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

enum VersionFilter<'q> {
    Latest,
    Exact(&'q str),
}

impl ListQuery {
    /// Build from decoded query pairs in request order. A repeated key keeps
    /// its first value; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "search" => &mut query.search,
                "limit" => &mut query.limit,
                "updated_since" => &mut query.updated_since,
                "version" => &mut query.version,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    pub fn effective_limit(&self) -> usize {
        parse_limit(self.limit.as_deref())
    }

    pub fn apply<'a>(&self, entries: &'a [ServerResponse]) -> ServerList<'a> {
        let search = non_empty(&self.search).map(str::to_lowercase);
        // An unparseable threshold can never be exceeded, so it filters out everything
        let since: Option<Option<DateTime<Utc>>> =
            non_empty(&self.updated_since).map(parse_timestamp);
        let version = non_empty(&self.version).map(|v| {
            if v == LATEST_TOKEN {
                VersionFilter::Latest
            } else {
                VersionFilter::Exact(v)
            }
        });

        let filtered: Vec<&'a ServerResponse> = entries
            .iter()
            .filter(|entry| search.as_deref().map_or(true, |s| matches_search(entry, s)))
            .filter(|entry| since.map_or(true, |since| updated_after(entry, since)))
            .filter(|entry| match &version {
                None => true,
                Some(VersionFilter::Latest) => entry.is_latest(),
                Some(VersionFilter::Exact(v)) => entry.version() == *v,
            })
            .collect();

        let limit = self.effective_limit();
        let count = filtered.len();
        let next_cursor = filtered.get(limit).map(|entry| entry.name().to_string());
        let servers = filtered.into_iter().take(limit).collect();

        ServerList {
            servers,
            metadata: ListMetadata {
                count,
                limit: Some(limit),
                next_cursor,
            },
        }
    }
}

fn matches_search(entry: &ServerResponse, needle: &str) -> bool {
    let server = &entry.server;
    let hit = |field: &str| field.to_lowercase().contains(needle);

    hit(server.name.as_str())
        || hit(server.description.as_str())
        || server.title.as_deref().is_some_and(hit)
        || server.tags.iter().any(|tag| hit(tag.as_str()))
}

fn updated_after(entry: &ServerResponse, since: Option<DateTime<Utc>>) -> bool {
    let Some(since) = since else {
        return false;
    };
    entry
        .updated_at()
        .and_then(parse_timestamp)
        .is_some_and(|updated| updated > since)
}
