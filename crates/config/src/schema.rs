//! Config schema types (server, mock mode, browser, agent and cleaner LLMs).

use std::path::PathBuf;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

use crate::env_subst::has_placeholder;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebpilotConfig {
    pub server: ServerConfig,
    pub mock: MockConfig,
    pub browser: BrowserConfig,
    pub agent: AgentConfig,
    pub cleaner: CleanerConfig,
}

impl WebpilotConfig {
    /// Whether tasks are answered from fixtures instead of a live browser.
    pub fn is_mock(&self) -> bool {
        self.mock.enabled
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to. Defaults to "0.0.0.0".
    pub bind: String,
    /// Port to listen on. Defaults to 8000.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

/// Mock mode: canned responses without a browser or LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Answer tasks from fixtures. Defaults to true.
    pub enabled: bool,
    /// Sleep for a random duration before answering, to emulate latency.
    pub simulate_delay: bool,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            simulate_delay: true,
            delay_min_ms: 500,
            delay_max_ms: 1500,
        }
    }
}

/// Local browser launched with remote debugging for the agent to drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Path to a Chromium-based browser binary (auto-detected if not set).
    pub chrome_path: Option<String>,
    /// Browser user-data directory. Defaults to a webpilot-owned directory
    /// under the platform data dir.
    pub user_data_dir: Option<PathBuf>,
    /// Profile directory inside `user_data_dir`.
    pub profile_directory: String,
    /// CDP remote-debugging port.
    pub remote_debug_port: u16,
    /// How long to wait after spawning the browser before using it.
    pub launch_settle_ms: u64,
    /// How long to wait after killing browser processes.
    pub stop_settle_ms: u64,
    /// Additional browser arguments.
    pub chrome_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            user_data_dir: None,
            profile_directory: "Profile 1".into(),
            remote_debug_port: 9422,
            launch_settle_ms: 5000,
            stop_settle_ms: 2000,
            chrome_args: Vec::new(),
        }
    }
}

impl BrowserConfig {
    /// The configured user-data directory, or `<data dir>/browser-profile`.
    pub fn resolved_user_data_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.user_data_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "webpilot")
            .map(|d| d.data_dir().join("browser-profile"))
            .unwrap_or_else(|| PathBuf::from(".webpilot").join("browser-profile"))
    }
}

/// LLM that drives the browser agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    #[serde(
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
    /// Delay before connecting to a freshly started browser.
    pub connect_delay_ms: u64,
    /// Page text handed to the LLM is truncated to this many characters.
    pub max_content_chars: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o".into(),
            connect_delay_ms: 5000,
            max_content_chars: 12_000,
        }
    }
}

impl AgentConfig {
    /// Whether a usable API key is configured.
    pub fn has_api_key(&self) -> bool {
        has_secret(&self.api_key)
    }

    /// The key still names an environment variable that was not set.
    pub fn has_unresolved_api_key(&self) -> bool {
        is_unresolved(&self.api_key)
    }
}

/// LLM that rewrites raw instructions into concise browser tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    #[serde(
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.aimlapi.com/v2".into(),
            model: "nvidia/llama-3.1-nemotron-70b-instruct".into(),
        }
    }
}

impl CleanerConfig {
    /// Whether a usable API key is configured.
    pub fn has_api_key(&self) -> bool {
        has_secret(&self.api_key)
    }

    /// The key still names an environment variable that was not set.
    pub fn has_unresolved_api_key(&self) -> bool {
        is_unresolved(&self.api_key)
    }
}

/// Blank keys and leftover `${VAR}` placeholders count as missing.
fn has_secret(secret: &Option<Secret<String>>) -> bool {
    secret.as_ref().is_some_and(|s| {
        let value = s.expose_secret();
        !value.trim().is_empty() && !has_placeholder(value)
    })
}

fn is_unresolved(secret: &Option<Secret<String>>) -> bool {
    secret
        .as_ref()
        .is_some_and(|s| has_placeholder(s.expose_secret()))
}

// ── Serde helpers for Secret<String> ────────────────────────────────────────

fn serialize_option_secret<S: serde::Serializer>(
    secret: &Option<Secret<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(s) => serializer.serialize_some(s.expose_secret()),
        None => serializer.serialize_none(),
    }
}
