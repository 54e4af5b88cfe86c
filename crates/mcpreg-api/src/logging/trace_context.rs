//! Per-request correlation
//!
//! Every request gets a short trace id and a coarse route label, attached to
//! a span so that handler logs inherit both.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{info, info_span, Span};

use mcpreg_core::branding;

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Six hex characters, unique enough to correlate lines of one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(String);

impl TraceId {
    pub fn generate() -> Self {
        let seq = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0);
        Self(format!("{:06x}", seq.wrapping_add(micros) & 0xFF_FFFF))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which registry resource a path addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Info,
    Health,
    List,
    Versions,
    Latest,
    Version,
    Unknown,
}

impl RouteKind {
    pub fn classify(path: &str) -> Self {
        match path {
            "/" => return Self::Info,
            "/health" => return Self::Health,
            _ => {}
        }

        let prefix = branding::api_path("/servers");
        let Some(rest) = path.strip_prefix(prefix.as_str()) else {
            return Self::Unknown;
        };
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::List,
            [_, "versions"] => Self::Versions,
            [_, "versions", "latest"] => Self::Latest,
            [_, "versions", _] => Self::Version,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Health => "health",
            Self::List => "list",
            Self::Versions => "versions",
            Self::Latest => "latest",
            Self::Version => "version",
            Self::Unknown => "unknown",
        }
    }
}

/// Correlation data for one request
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub trace_id: TraceId,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub route: RouteKind,
    pub started_at: Instant,
}

impl TraceContext {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            trace_id: TraceId::generate(),
            method: method.to_string(),
            path: path.to_string(),
            query: None,
            route: RouteKind::classify(path),
            started_at: Instant::now(),
        }
    }

    /// Attach the query string (empty strings are dropped)
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.filter(|q| !q.is_empty()).map(String::from);
        self
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    /// Path plus query string, as requested
    pub fn target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }
}

/// Span and the two log lines bracketing a request
pub struct RequestSpan;

impl RequestSpan {
    pub fn enter(ctx: &TraceContext) -> Span {
        info_span!(
            "request",
            trace_id = %ctx.trace_id,
            route = ctx.route.as_str(),
        )
    }

    pub fn log_entry(ctx: &TraceContext) {
        info!("→ {} {}", ctx.method, ctx.target());
    }

    /// `summary` is a short description of the response body, when one could be made
    pub fn log_exit(ctx: &TraceContext, status: u16, summary: Option<&str>) {
        let elapsed = ctx.elapsed_ms();
        match summary {
            Some(summary) => info!("← {} {} ({}ms)", status, summary, elapsed),
            None => info!("← {} ({}ms)", status, elapsed),
        }
    }
}
