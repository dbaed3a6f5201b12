//! HTTP wire types for the webpilot task API.
//!
//! Every endpoint speaks JSON:
//! - `TaskRequest`: client → `POST /execute-task`
//! - `TaskResponse`: result of a task, successful or not
//! - `SampleQuery`: entries of `GET /sample-queries`

use serde::{Deserialize, Serialize};

// ── Constants ────────────────────────────────────────────────────────────────

pub const STATUS_MESSAGE: &str = "Browser Automation API is running";
pub const BROWSER_STARTED_MESSAGE: &str = "Browser started";
pub const BROWSER_STOPPED_MESSAGE: &str = "Browser stopped";

// ── Task request/response ────────────────────────────────────────────────────

/// Inbound task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Free-text instruction.
    pub task: String,
    /// Rewrite the instruction through the cleaning LLM before running it.
    /// Ignored in mock mode.
    #[serde(default = "default_use_llm_cleaning")]
    pub use_llm_cleaning: bool,
}

fn default_use_llm_cleaning() -> bool {
    true
}

impl TaskRequest {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            use_llm_cleaning: true,
        }
    }

    #[must_use]
    pub fn without_cleaning(mut self) -> Self {
        self.use_llm_cleaning = false;
        self
    }
}

/// Outcome of a task.
///
/// A successful response always carries `result` and never `error`; a failed
/// one carries only `error`. The fields are private so that the two shapes
/// can only be built through [`TaskResponse::success`] and
/// [`TaskResponse::failure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    html_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<String>>,
}

impl TaskResponse {
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            error: None,
            url: None,
            title: None,
            html_content: None,
            steps: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
            url: None,
            title: None,
            html_content: None,
            steps: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        if self.success {
            self.url = Some(url.into());
        }
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        if self.success {
            self.title = Some(title.into());
        }
        self
    }

    pub fn with_html_content(mut self, html: impl Into<String>) -> Self {
        if self.success {
            self.html_content = Some(html.into());
        }
        self
    }

    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        if self.success {
            self.steps = Some(steps);
        }
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn html_content(&self) -> Option<&str> {
        self.html_content.as_deref()
    }

    pub fn steps(&self) -> Option<&[String]> {
        self.steps.as_deref()
    }

    /// `true` when exactly one of `result`/`error` is present and it agrees
    /// with `success`. Always holds for values built in-process; useful for
    /// checking deserialized payloads.
    pub fn is_consistent(&self) -> bool {
        match (self.success, &self.result, &self.error) {
            (true, Some(_), None) => true,
            (false, None, Some(_)) => {
                self.url.is_none()
                    && self.title.is_none()
                    && self.html_content.is_none()
                    && self.steps.is_none()
            },
            _ => false,
        }
    }
}

// ── Informational payloads ───────────────────────────────────────────────────

/// `GET /` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub message: String,
    pub mock_mode: bool,
}

/// An example task shown to frontend users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleQuery {
    pub category: String,
    pub query: String,
    pub description: String,
}

/// `GET /sample-queries` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleQueries {
    pub queries: Vec<SampleQuery>,
}

/// `POST /start-chrome` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserStarted {
    pub message: String,
    pub port: u16,
}

/// `POST /stop-chrome` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserStopped {
    pub message: String,
}

/// Error body used for HTTP-level failures, shaped like `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
