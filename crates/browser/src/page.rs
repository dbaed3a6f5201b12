//! Reading one page through a running browser's debugging endpoint.

use std::time::Duration;

use {
    chromiumoxide::{Browser, handler::HandlerConfig},
    futures::StreamExt,
    serde::Deserialize,
    tracing::{debug, info},
};

use crate::error::BrowserError;

/// Per-command CDP timeout, navigation included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const READ_TEXT_JS: &str = "document.body ? document.body.innerText : ''";

/// What the agent saw on a page.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    /// Visible text, capped at the requested length.
    pub text: String,
}

#[derive(Deserialize)]
struct VersionInfo {
    #[serde(rename = "webSocketDebuggerUrl")]
    web_socket_debugger_url: String,
}

/// Ask the debugging endpoint for its browser-level websocket URL.
pub async fn resolve_ws_url(client: &reqwest::Client, endpoint: &str) -> Result<String, BrowserError> {
    let endpoint = endpoint.trim_end_matches('/');
    let unreachable = |reason: String| BrowserError::EndpointUnreachable {
        endpoint: endpoint.to_string(),
        reason,
    };

    let resp = client
        .get(format!("{endpoint}/json/version"))
        .send()
        .await
        .map_err(|e| unreachable(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(unreachable(format!("HTTP {}", resp.status())));
    }
    let info: VersionInfo = resp.json().await.map_err(|e| unreachable(e.to_string()))?;
    Ok(info.web_socket_debugger_url)
}

/// Open `url` in a new tab of the browser at `endpoint` and read it.
pub async fn visit(endpoint: &str, url: &str, max_chars: usize) -> Result<PageSnapshot, BrowserError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default();
    let ws_url = resolve_ws_url(&client, endpoint).await?;
    debug!(ws_url, "connecting to browser");

    let handler_config = HandlerConfig {
        request_timeout: REQUEST_TIMEOUT,
        ..Default::default()
    };
    let (browser, mut handler) = Browser::connect_with_config(&ws_url, handler_config).await?;
    let events = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                debug!(error = %e, "browser handler event error");
            }
        }
    });

    let result = read_page(&browser, url, max_chars).await;
    // Dropping a connected browser leaves the process running.
    drop(browser);
    events.abort();
    result
}

async fn read_page(browser: &Browser, url: &str, max_chars: usize) -> Result<PageSnapshot, BrowserError> {
    let page = browser.new_page("about:blank").await?;
    page.goto(url)
        .await
        .map_err(|e| BrowserError::NavigationFailed(format!("{url}: {e}")))?;
    if let Err(e) = page.wait_for_navigation().await {
        debug!(url, error = %e, "navigation did not settle, reading current page");
    }

    let current_url = page.url().await.ok().flatten().unwrap_or_else(|| url.to_string());
    let title = page.get_title().await.ok().flatten().unwrap_or_default();
    let text: String = page
        .evaluate(READ_TEXT_JS)
        .await
        .map_err(|e| BrowserError::JsEvalFailed(e.to_string()))?
        .into_value()
        .map_err(|e| BrowserError::JsEvalFailed(format!("{e:?}")))?;

    info!(url = %current_url, title = %title, chars = text.len(), "page read");
    let _ = page.close().await;

    Ok(PageSnapshot {
        url: current_url,
        title,
        text: truncate_chars(&text, max_chars),
    })
}

/// Cut `text` to at most `max` characters, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::get};

    use super::*;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn resolves_websocket_url() {
        let app = Router::new().route(
            "/json/version",
            get(|| async {
                Json(serde_json::json!({
                    "Browser": "Chrome/126.0",
                    "webSocketDebuggerUrl": "ws://127.0.0.1:9422/devtools/browser/abc"
                }))
            }),
        );
        let base = serve(app).await;

        let ws = resolve_ws_url(&reqwest::Client::new(), &format!("{base}/"))
            .await
            .unwrap();
        assert_eq!(ws, "ws://127.0.0.1:9422/devtools/browser/abc");
    }

    #[tokio::test]
    async fn non_success_status_is_unreachable() {
        let app = Router::new().route("/json/version", get(|| async { StatusCode::NOT_FOUND }));
        let base = serve(app).await;

        let err = resolve_ws_url(&reqwest::Client::new(), &base).await.unwrap_err();
        assert!(matches!(err, BrowserError::EndpointUnreachable { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let err = visit("http://127.0.0.1:1", "https://example.com", 100)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("127.0.0.1:1"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
