//! Single-shot browser agent: plan a start URL, read the page, answer.

use std::time::Duration;

use {
    async_trait::async_trait,
    tracing::{info, warn},
    url::Url,
    webpilot_config::AgentConfig,
    webpilot_providers::{ChatClient, ChatMessage},
    webpilot_service_traits::{BrowserAgent, ServiceResult},
};

use crate::{
    error::BrowserError,
    page::{self, PageSnapshot},
};

const PLAN_PROMPT: &str = "You control a web browser. Given a task, reply with the one URL \
the browser should open first to complete it. Reply with the URL only.";

const ANSWER_PROMPT: &str = "You control a web browser and have just read the page below. \
Complete the user's task using only what the page shows. Be concise. If the page does not \
contain the answer, say what you found instead.";

/// Drives the browser at a debugging endpoint on behalf of an LLM.
pub struct CdpBrowserAgent {
    llm: ChatClient,
    connect_delay: Duration,
    max_content_chars: usize,
}

impl CdpBrowserAgent {
    pub fn new(llm: ChatClient, connect_delay: Duration, max_content_chars: usize) -> Self {
        Self {
            llm,
            connect_delay,
            max_content_chars,
        }
    }

    /// `None` when the agent section carries no API key.
    pub fn from_config(cfg: &AgentConfig) -> Option<Self> {
        let llm = ChatClient::from_agent_config(cfg)?;
        Some(Self::new(
            llm,
            Duration::from_millis(cfg.connect_delay_ms),
            cfg.max_content_chars,
        ))
    }

    async fn plan(&self, task: &str) -> String {
        let messages = [ChatMessage::system(PLAN_PROMPT), ChatMessage::user(task)];
        match self.llm.complete(&messages).await {
            Ok(reply) => parse_start_url(&reply).map(String::from).unwrap_or_else(|| {
                warn!(reply = %reply, "planner reply was not a URL, searching instead");
                search_url(task)
            }),
            Err(e) => {
                warn!(error = %e, "planning failed, searching instead");
                search_url(task)
            },
        }
    }

    async fn answer(&self, task: &str, snapshot: &PageSnapshot) -> Result<String, BrowserError> {
        let messages = [
            ChatMessage::system(ANSWER_PROMPT),
            ChatMessage::user(answer_request(task, snapshot)),
        ];
        Ok(self.llm.complete(&messages).await?)
    }
}

#[async_trait]
impl BrowserAgent for CdpBrowserAgent {
    async fn run(&self, task: &str, endpoint: &str) -> ServiceResult<String> {
        tokio::time::sleep(self.connect_delay).await;

        let start = self.plan(task).await;
        info!(url = %start, model = self.llm.model(), "agent starting");

        let snapshot = page::visit(endpoint, &start, self.max_content_chars).await?;
        let answer = self.answer(task, &snapshot).await?;
        info!(url = %snapshot.url, chars = answer.len(), "agent finished");
        Ok(answer)
    }
}

/// First absolute http(s) URL in an LLM reply, ignoring quoting.
pub fn parse_start_url(reply: &str) -> Option<Url> {
    reply
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| matches!(c, '<' | '>' | '"' | '\'' | '`' | '(' | ')')))
        .filter_map(|token| Url::parse(token).ok())
        .find(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
}

/// DuckDuckGo search for the raw task.
pub fn search_url(task: &str) -> String {
    format!("https://duckduckgo.com/?q={}", urlencoding::encode(task))
}

fn answer_request(task: &str, snapshot: &PageSnapshot) -> String {
    format!(
        "Task: {task}\n\nPage: {}\nTitle: {}\n\nContent:\n{}",
        snapshot.url, snapshot.title, snapshot.text
    )
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use {
        axum::{Json, Router, routing::post},
        secrecy::Secret,
    };

    use super::*;

    #[test]
    fn url_extracted_from_chatty_reply() {
        let url = parse_start_url("Sure! Open <https://news.ycombinator.com/> to see it.").unwrap();
        assert_eq!(url.as_str(), "https://news.ycombinator.com/");

        let url = parse_start_url("`https://en.wikipedia.org/wiki/Rust`").unwrap();
        assert_eq!(url.host_str(), Some("en.wikipedia.org"));
    }

    #[test]
    fn non_web_urls_rejected() {
        assert!(parse_start_url("file:///etc/passwd").is_none());
        assert!(parse_start_url("I cannot help with that").is_none());
        assert!(parse_start_url("").is_none());
    }

    #[test]
    fn search_fallback_encodes_task() {
        let url = Url::parse(&search_url("weather in São Paulo & Rio")).unwrap();
        assert_eq!(url.host_str(), Some("duckduckgo.com"));
        let (_, q) = url.query_pairs().find(|(k, _)| k == "q").unwrap();
        assert_eq!(q, "weather in São Paulo & Rio");
    }

    #[test]
    fn answer_request_includes_page() {
        let snapshot = PageSnapshot {
            url: "https://example.com/".into(),
            title: "Example Domain".into(),
            text: "This domain is for use in examples.".into(),
        };
        let body = answer_request("what is this site for?", &snapshot);
        assert!(body.starts_with("Task: what is this site for?"));
        assert!(body.contains("Title: Example Domain"));
        assert!(body.ends_with("This domain is for use in examples."));
    }

    #[test]
    fn config_without_key_builds_no_agent() {
        assert!(CdpBrowserAgent::from_config(&AgentConfig::default()).is_none());

        let unresolved = AgentConfig {
            api_key: Some(Secret::new("${OPENAI_API_KEY}".into())),
            ..Default::default()
        };
        assert!(CdpBrowserAgent::from_config(&unresolved).is_none());
    }

    #[tokio::test]
    async fn unreachable_browser_fails_after_planning() {
        let calls = Arc::new(Mutex::new(0usize));
        let seen = Arc::clone(&calls);
        let app = Router::new().route(
            "/chat/completions",
            post(move || {
                let seen = Arc::clone(&seen);
                async move {
                    *seen.lock().unwrap() += 1;
                    Json(serde_json::json!({
                        "choices": [{ "message": { "content": "https://example.com" } }]
                    }))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let llm = ChatClient::new(Secret::new("k".into()), "m", format!("http://{addr}"));
        let agent = CdpBrowserAgent::new(llm, Duration::ZERO, 1000);

        let err = agent.run("open example", "http://127.0.0.1:1").await.unwrap_err();
        assert!(err.to_string().contains("unreachable"));
        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
