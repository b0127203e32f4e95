//! Application state.

use markwave_core::ReferralStore;
use std::sync::Arc;

/// State shared across handlers: the persistence gateway, opened once at
/// startup and injected rather than reached as a global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReferralStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ReferralStore>) -> Self {
        Self { store }
    }
}
