//! Static Export Integration Tests
//!
//! Exports the fixture catalog and compares every written document with
//! the live response for the same URL.

mod round_trip;
