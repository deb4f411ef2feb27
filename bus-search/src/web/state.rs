//! Application state for the web layer.

use std::sync::Arc;

use crate::dashboard::DashboardSettings;
use crate::source::TripSource;

/// Shared application state.
///
/// Holds no per-request data; every request opens its own session on the
/// source.
#[derive(Clone)]
pub struct AppState {
    /// Where trips are read from
    pub source: Arc<dyn TripSource>,

    /// Rating and empty-filter policies
    pub settings: DashboardSettings,
}

impl AppState {
    /// Create a new app state.
    pub fn new(source: impl TripSource + 'static, settings: DashboardSettings) -> Self {
        Self {
            source: Arc::new(source),
            settings,
        }
    }
}
