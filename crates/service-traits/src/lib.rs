//! Capability traits for the collaborators a live task needs.
//!
//! Each trait has a `Noop` implementation so the gateway can run in mock mode
//! (or in tests) without a browser or LLM credentials. Live implementations
//! live in `webpilot-browser` and `webpilot-providers`.

use {async_trait::async_trait, tracing::debug};

/// Error type returned by collaborator methods.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    Message { message: String },
    #[error("{service} not configured")]
    NotConfigured { service: &'static str },
}

impl ServiceError {
    #[must_use]
    pub fn message(message: impl std::fmt::Display) -> Self {
        Self::Message {
            message: message.to_string(),
        }
    }
}

impl From<String> for ServiceError {
    fn from(value: String) -> Self {
        Self::message(value)
    }
}

impl From<&str> for ServiceError {
    fn from(value: &str) -> Self {
        Self::message(value)
    }
}

pub type ServiceResult<T = ()> = Result<T, ServiceError>;

// ── Browser process ─────────────────────────────────────────────────────────

/// A local browser exposing a remote-debugging endpoint.
///
/// `start` and `stop` are best-effort and idempotent: starting kills any
/// running instance first, stopping with nothing running succeeds.
#[async_trait]
pub trait BrowserProcess: Send + Sync {
    async fn start(&self) -> ServiceResult;
    async fn stop(&self) -> ServiceResult;
    fn debug_port(&self) -> u16;

    /// HTTP endpoint of the debugging interface.
    fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.debug_port())
    }
}

pub struct NoopBrowserProcess {
    port: u16,
}

impl NoopBrowserProcess {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

#[async_trait]
impl BrowserProcess for NoopBrowserProcess {
    async fn start(&self) -> ServiceResult {
        debug!(port = self.port, "noop browser start");
        Ok(())
    }

    async fn stop(&self) -> ServiceResult {
        debug!("noop browser stop");
        Ok(())
    }

    fn debug_port(&self) -> u16 {
        self.port
    }
}

// ── Task cleaner ────────────────────────────────────────────────────────────

/// Rewrites a raw instruction into a task the browser agent can act on.
///
/// Infallible by contract: implementations fall back to returning the input.
#[async_trait]
pub trait TaskCleaner: Send + Sync {
    async fn clean(&self, task: &str) -> String;

    /// Whether cleaning does anything. Used to skip the call entirely.
    fn is_configured(&self) -> bool {
        true
    }
}

pub struct NoopTaskCleaner;

#[async_trait]
impl TaskCleaner for NoopTaskCleaner {
    async fn clean(&self, task: &str) -> String {
        task.to_string()
    }

    fn is_configured(&self) -> bool {
        false
    }
}

// ── Browser agent ───────────────────────────────────────────────────────────

/// Performs a task in the browser reachable at `endpoint` and returns a
/// free-text result.
#[async_trait]
pub trait BrowserAgent: Send + Sync {
    async fn run(&self, task: &str, endpoint: &str) -> ServiceResult<String>;

    /// Whether the agent has the credentials it needs to run.
    fn is_configured(&self) -> bool {
        true
    }
}

pub struct NoopBrowserAgent;

#[async_trait]
impl BrowserAgent for NoopBrowserAgent {
    async fn run(&self, _task: &str, _endpoint: &str) -> ServiceResult<String> {
        Err(ServiceError::NotConfigured {
            service: "browser agent",
        })
    }

    fn is_configured(&self) -> bool {
        false
    }
}
