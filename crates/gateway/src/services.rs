//! The collaborator bundle a [`crate::TaskService`] delegates to.

use std::sync::Arc;

use webpilot_service_traits::{
    BrowserAgent, BrowserProcess, NoopBrowserAgent, NoopBrowserProcess, NoopTaskCleaner, TaskCleaner,
};

#[derive(Clone)]
pub struct TaskServices {
    pub process: Arc<dyn BrowserProcess>,
    pub cleaner: Arc<dyn TaskCleaner>,
    pub agent: Arc<dyn BrowserAgent>,
}

impl TaskServices {
    /// All noop collaborators. Enough for mock mode.
    pub fn noop(debug_port: u16) -> Self {
        Self {
            process: Arc::new(NoopBrowserProcess::new(debug_port)),
            cleaner: Arc::new(NoopTaskCleaner),
            agent: Arc::new(NoopBrowserAgent),
        }
    }

    pub fn with_process(mut self, process: Arc<dyn BrowserProcess>) -> Self {
        self.process = process;
        self
    }

    pub fn with_cleaner(mut self, cleaner: Arc<dyn TaskCleaner>) -> Self {
        self.cleaner = cleaner;
        self
    }

    pub fn with_agent(mut self, agent: Arc<dyn BrowserAgent>) -> Self {
        self.agent = agent;
        self
    }
}
