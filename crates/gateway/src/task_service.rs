//! Task execution: fixture answers in mock mode, browser + LLM in live mode.

use std::{
    fmt::Display,
    ops::RangeInclusive,
    time::{Duration, Instant},
};

use {
    axum::{
        http::StatusCode,
        response::{IntoResponse, Json, Response},
    },
    rand::Rng,
    tracing::{info, warn},
    webpilot_config::{MockConfig, WebpilotConfig},
    webpilot_protocol::{ErrorDetail, TaskRequest, TaskResponse},
};

use crate::services::TaskServices;

/// Knobs for the fixture path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MockOptions {
    /// Simulated latency range in milliseconds. `None` answers immediately.
    pub delay_ms: Option<RangeInclusive<u64>>,
}

impl MockOptions {
    pub fn instant() -> Self {
        Self { delay_ms: None }
    }

    pub fn from_config(cfg: &MockConfig) -> Self {
        let delay_ms = cfg.simulate_delay.then(|| {
            let (lo, hi) = (cfg.delay_min_ms, cfg.delay_max_ms);
            lo.min(hi)..=hi.max(lo)
        });
        Self { delay_ms }
    }
}

/// How tasks are answered. Chosen once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    Mock(MockOptions),
    Live,
}

impl ExecutionMode {
    pub fn from_config(cfg: &WebpilotConfig) -> Self {
        if cfg.is_mock() {
            Self::Mock(MockOptions::from_config(&cfg.mock))
        } else {
            Self::Live
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Mock(_) => "mock",
            Self::Live => "live",
        }
    }
}

/// Failures that reject a task before any work starts.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Missing {0}")]
    MissingCredential(&'static str),
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDetail::new(self.to_string())),
        )
            .into_response()
    }
}

pub struct TaskService {
    mode: ExecutionMode,
    services: TaskServices,
}

impl TaskService {
    pub fn new(mode: ExecutionMode, services: TaskServices) -> Self {
        Self { mode, services }
    }

    pub fn mode(&self) -> &ExecutionMode {
        &self.mode
    }

    pub fn services(&self) -> &TaskServices {
        &self.services
    }

    /// Run one task in the configured mode.
    ///
    /// Collaborator failures come back as `Ok` with `success == false`;
    /// only a missing agent credential in live mode is an `Err`.
    pub async fn execute(&self, request: &TaskRequest) -> Result<TaskResponse, TaskError> {
        match self.mode {
            ExecutionMode::Mock(_) => Ok(self.execute_mock(&request.task).await),
            ExecutionMode::Live => {
                if !self.services.agent.is_configured() {
                    warn!("live task rejected: no agent credential");
                    return Err(TaskError::MissingCredential("OPENAI_API_KEY"));
                }
                Ok(self.execute_live(request).await)
            },
        }
    }

    /// Answer from fixtures. Never fails.
    pub async fn execute_mock(&self, task: &str) -> TaskResponse {
        let started = Instant::now();
        if let ExecutionMode::Mock(MockOptions {
            delay_ms: Some(ref range),
        }) = self.mode
        {
            let delay = rand::rng().random_range(range.clone());
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let result = webpilot_fixtures::respond(task);
        info!(
            mode = self.mode.label(),
            topic = %result.topic,
            url = %result.url,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "task answered from fixture"
        );
        result.into()
    }

    async fn execute_live(&self, request: &TaskRequest) -> TaskResponse {
        let started = Instant::now();
        let process = &self.services.process;

        if let Err(e) = process.start().await {
            return self.abort(e, started).await;
        }

        let task = if request.use_llm_cleaning && self.services.cleaner.is_configured() {
            self.services.cleaner.clean(&request.task).await
        } else {
            request.task.clone()
        };
        info!(mode = self.mode.label(), task = %task, "running live task");

        let answer = match self.services.agent.run(&task, &process.endpoint()).await {
            Ok(answer) => answer,
            Err(e) => return self.abort(e, started).await,
        };

        if let Err(e) = process.stop().await {
            warn!(error = %e, "browser stop after task failed");
        }
        info!(
            mode = self.mode.label(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "live task finished"
        );
        TaskResponse::success(answer)
    }

    async fn abort(&self, err: impl Display, started: Instant) -> TaskResponse {
        warn!(
            mode = self.mode.label(),
            error = %err,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "live task failed"
        );
        if let Err(e) = self.services.process.stop().await {
            warn!(error = %e, "browser stop after failure also failed");
        }
        TaskResponse::failure(format!("Error: {err}"))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn mock_service() -> TaskService {
        TaskService::new(
            ExecutionMode::Mock(MockOptions::instant()),
            TaskServices::noop(9422),
        )
    }

    #[tokio::test]
    async fn mock_answers_weather() {
        let resp = mock_service()
            .execute(&TaskRequest::new("What's the weather like today?"))
            .await
            .unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.url(), Some("https://weather.com"));
        assert_eq!(resp.steps().map(<[String]>::len), Some(4));
    }

    #[tokio::test]
    async fn mock_ignores_missing_credentials() {
        // Noop agent reports itself unconfigured; mock mode must not care.
        let resp = mock_service()
            .execute(&TaskRequest::new("anything"))
            .await
            .unwrap();
        assert!(resp.is_consistent());
    }

    #[tokio::test]
    async fn live_without_agent_is_missing_credential() {
        let service = TaskService::new(ExecutionMode::Live, TaskServices::noop(9422));
        let err = service
            .execute(&TaskRequest::new("check the news"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing OPENAI_API_KEY");
    }

    #[tokio::test(start_paused = true)]
    async fn mock_delay_stays_in_range() {
        let service = TaskService::new(
            ExecutionMode::Mock(MockOptions {
                delay_ms: Some(500..=1500),
            }),
            TaskServices::noop(9422),
        );
        let started = tokio::time::Instant::now();
        service.execute_mock("weather").await;
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed <= Duration::from_millis(1500));
    }

    #[test]
    fn options_follow_config() {
        let mut cfg = WebpilotConfig::default();
        assert_eq!(
            ExecutionMode::from_config(&cfg),
            ExecutionMode::Mock(MockOptions {
                delay_ms: Some(500..=1500)
            })
        );

        cfg.mock.simulate_delay = false;
        assert_eq!(
            ExecutionMode::from_config(&cfg),
            ExecutionMode::Mock(MockOptions::instant())
        );

        cfg.mock.delay_min_ms = 900;
        cfg.mock.delay_max_ms = 100;
        cfg.mock.simulate_delay = true;
        assert_eq!(MockOptions::from_config(&cfg.mock).delay_ms, Some(100..=900));

        cfg.mock.enabled = false;
        assert_eq!(ExecutionMode::from_config(&cfg), ExecutionMode::Live);
    }
}
