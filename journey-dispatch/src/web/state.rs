//! Application state for the web layer.

use std::sync::Arc;

use crate::dispatch::JourneySubmitter;

/// Shared application state.
///
/// Generic over the submitter so handlers can run against the real
/// dispatch client or the in-memory mock.
pub struct AppState<S> {
    /// Where planned journeys are sent
    pub submitter: Arc<S>,
}

impl<S: JourneySubmitter> AppState<S> {
    /// Create a new app state.
    pub fn new(submitter: S) -> Self {
        Self {
            submitter: Arc::new(submitter),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            submitter: Arc::clone(&self.submitter),
        }
    }
}
