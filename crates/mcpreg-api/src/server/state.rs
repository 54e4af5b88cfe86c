//! Shared handler state

use mcpreg_core::Catalog;
use std::sync::Arc;

/// State handed to every handler
///
/// The catalog is loaded once before the router is built and never written
/// afterwards, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}
