//! Shared application state.

use std::sync::Arc;

use langlens_ai::Detector;

/// Handle to the loaded artifact set, cloned into every handler.
///
/// The detector is read-only after startup, so a plain `Arc` is enough.
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Detector>,
}

impl AppState {
    pub fn new(detector: Detector) -> Self {
        Self {
            detector: Arc::new(detector),
        }
    }
}
