//! Minimal OpenAI-compatible chat-completions client.
//!
//! Works against any endpoint speaking the `/chat/completions` shape
//! (OpenAI, AIML API, local proxies). Non-streaming, no tools.

use std::time::Duration;

use {
    secrecy::{ExposeSecret, Secret},
    serde::Serialize,
    tracing::{debug, trace, warn},
};

/// Errors from a chat-completions call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error HTTP {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response contained no message content")]
    EmptyResponse,
}

/// One chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct ChatClient {
    api_key: Secret<String>,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(api_key: Secret<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Build a client from the agent section of the config, if it has a key.
    pub fn from_agent_config(cfg: &webpilot_config::AgentConfig) -> Option<Self> {
        if !cfg.has_api_key() {
            return None;
        }
        let key = cfg.api_key.clone()?;
        Some(Self::new(key, cfg.model.clone(), cfg.base_url.clone()))
    }

    /// Build a client from the cleaner section of the config, if it has a key.
    pub fn from_cleaner_config(cfg: &webpilot_config::CleanerConfig) -> Option<Self> {
        if !cfg.has_api_key() {
            return None;
        }
        let key = cfg.api_key.clone()?;
        Some(Self::new(key, cfg.model.clone(), cfg.base_url.clone()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `messages` and return the assistant's text.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        debug!(
            model = %self.model,
            messages_count = messages.len(),
            "chat completion request"
        );

        let http_resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?;

        let status = http_resp.status();
        if !status.is_success() {
            let body_text = http_resp.text().await.unwrap_or_default();
            warn!(status = %status, model = %self.model, body = %body_text, "chat completion API error");
            return Err(ProviderError::Api {
                status,
                body: body_text,
            });
        }

        let resp = http_resp.json::<serde_json::Value>().await?;
        trace!(response = %resp, "chat completion raw response");

        resp["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .ok_or(ProviderError::EmptyResponse)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, http::StatusCode, routing::post};

    use super::*;

    pub(crate) type Captured = Arc<Mutex<Vec<serde_json::Value>>>;

    /// Start a fake `/chat/completions` server answering with `status` and
    /// `reply`, capturing every request body.
    pub(crate) async fn start_mock(status: StatusCode, reply: serde_json::Value) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let cap = Arc::clone(&captured);
        let app = Router::new().route(
            "/chat/completions",
            post(move |Json(body): Json<serde_json::Value>| {
                let cap = Arc::clone(&cap);
                let reply = reply.clone();
                async move {
                    cap.lock().unwrap().push(body);
                    (status, Json(reply))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), captured)
    }

    pub(crate) fn reply_with(text: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }]
        })
    }

    #[tokio::test]
    async fn returns_trimmed_content() {
        let (base, captured) = start_mock(StatusCode::OK, reply_with("  hello  ")).await;
        let client = ChatClient::new(Secret::new("k".into()), "gpt-4o", format!("{base}/"));

        let text = client
            .complete(&[ChatMessage::system("sys"), ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(text, "hello");

        let bodies = captured.lock().unwrap();
        assert_eq!(bodies[0]["model"], "gpt-4o");
        assert_eq!(bodies[0]["messages"][0]["role"], "system");
        assert_eq!(bodies[0]["messages"][1]["content"], "hi");
    }

    #[tokio::test]
    async fn api_error_carries_status() {
        let (base, _) =
            start_mock(StatusCode::UNAUTHORIZED, serde_json::json!({"error": "bad key"})).await;
        let client = ChatClient::new(Secret::new("k".into()), "gpt-4o", base);

        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Api { status, .. } if status == StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn blank_content_is_an_error() {
        let (base, _) = start_mock(StatusCode::OK, reply_with("   ")).await;
        let client = ChatClient::new(Secret::new("k".into()), "gpt-4o", base);

        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[test]
    fn config_without_key_builds_nothing() {
        let cfg = webpilot_config::AgentConfig::default();
        assert!(ChatClient::from_agent_config(&cfg).is_none());

        let cfg = webpilot_config::CleanerConfig {
            api_key: Some(Secret::new("aiml".into())),
            ..Default::default()
        };
        let client = ChatClient::from_cleaner_config(&cfg).unwrap();
        assert_eq!(client.model(), "nvidia/llama-3.1-nemotron-70b-instruct");
    }
}
