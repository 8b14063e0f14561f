//! Application state shared by all API handlers.

use crate::screening::Screener;
use std::sync::Arc;

/// Shared application state, cloned per request.
///
/// The screener and its loaded artifacts are read-only after startup, so
/// handlers need no coordination beyond the shared `Arc`.
#[derive(Clone)]
pub struct AppState {
    screener: Arc<Screener>,
}

impl AppState {
    /// Create the state over a fully initialized screener.
    pub fn new(screener: Screener) -> Self {
        Self {
            screener: Arc::new(screener),
        }
    }

    /// Access the screener.
    pub fn screener(&self) -> &Screener {
        &self.screener
    }
}
