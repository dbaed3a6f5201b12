//! Browser error types.

use {thiserror::Error, webpilot_service_traits::ServiceError};

/// Errors that can occur while managing or driving the browser.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("browser not available: {0}")]
    BrowserNotAvailable(String),

    #[error("browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("failed to stop browser: {0}")]
    StopFailed(String),

    #[error("debugging endpoint {endpoint} unreachable: {reason}")]
    EndpointUnreachable { endpoint: String, reason: String },

    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript evaluation failed: {0}")]
    JsEvalFailed(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("LLM error: {0}")]
    Llm(#[from] webpilot_providers::ProviderError),
}

impl From<chromiumoxide::error::CdpError> for BrowserError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        BrowserError::Cdp(err.to_string())
    }
}

impl From<BrowserError> for ServiceError {
    fn from(err: BrowserError) -> Self {
        ServiceError::message(err)
    }
}
