use std::sync::Arc;

use crate::task_service::TaskService;

/// Shared gateway state.
pub struct GatewayState {
    pub tasks: TaskService,
    pub version: String,
}

impl GatewayState {
    pub fn new(tasks: TaskService) -> Arc<Self> {
        Self::with_version(tasks, env!("CARGO_PKG_VERSION"))
    }

    pub fn with_version(tasks: TaskService, version: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            tasks,
            version: version.into(),
        })
    }

    pub fn mock_mode(&self) -> bool {
        self.tasks.mode().is_mock()
    }
}
