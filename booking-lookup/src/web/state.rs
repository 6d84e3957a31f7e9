//! Application state for the web layer.

use std::sync::Arc;

use crate::app::App;

/// Shared application state.
///
/// One application instance, and so one selection, per server process.
pub struct AppState<G> {
    /// The booking lookup application
    pub app: Arc<App<G>>,
}

impl<G> AppState<G> {
    /// Create a new app state.
    pub fn new(app: App<G>) -> Self {
        Self { app: Arc::new(app) }
    }
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
        }
    }
}
