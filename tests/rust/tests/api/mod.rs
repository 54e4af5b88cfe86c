//! Registry API Integration Tests
//!
//! Serves the real router on a random port and queries it over HTTP:
//! - Name and version lookups
//! - List filtering and truncation
//! - CORS and error bodies

mod listing;
mod lookup;
