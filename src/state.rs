use std::sync::Arc;

use crate::database::JobStore;

/// Shared handler state: the jobs accessor behind its trait
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobStore>,
}

impl AppState {
    pub fn new(jobs: Arc<dyn JobStore>) -> Self {
        Self { jobs }
    }
}
