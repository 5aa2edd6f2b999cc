use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::process::ProcessRunner;
use crate::infrastructure::queue::MessageSink;
use crate::infrastructure::storage::ObjectStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: Arc<dyn ObjectStore>,
    pub queue: Arc<dyn MessageSink>,
    pub runner: Arc<dyn ProcessRunner>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn ObjectStore>,
        queue: Arc<dyn MessageSink>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            config,
            storage,
            queue,
            runner,
        }
    }
}
