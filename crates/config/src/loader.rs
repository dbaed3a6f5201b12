use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{
    env_subst::substitute_env,
    error::{Context, Error, Result},
    schema::WebpilotConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "webpilot.toml",
    "webpilot.yaml",
    "webpilot.yml",
    "webpilot.json",
];

/// Load config from the given path (any supported format), then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<WebpilotConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let raw = substitute_env(&raw);
    let mut config = parse_config(&raw, path)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./webpilot.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/webpilot/webpilot.{toml,yaml,yml,json}` (user-global)
///
/// Falls back to `WebpilotConfig::default()` (plus env overrides) if no
/// config file is found or it fails to parse.
pub fn discover_and_load() -> WebpilotConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    let mut config = WebpilotConfig::default();
    apply_env_overrides(&mut config);
    config
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/webpilot/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "webpilot").map(|d| d.config_dir().to_path_buf())
}

/// Apply well-known environment variables on top of the file config.
///
/// | variable | field |
/// |---|---|
/// | `OPENAI_API_KEY` | `agent.api_key` |
/// | `AIML_API_KEY` | `cleaner.api_key` |
/// | `AIML_API_ENDPOINT` | `cleaner.base_url` |
/// | `WEBPILOT_MOCK` | `mock.enabled` |
/// | `WEBPILOT_PORT` | `server.port` |
pub fn apply_env_overrides(config: &mut WebpilotConfig) {
    apply_env_overrides_with(config, |name| std::env::var(name).ok());
}

fn apply_env_overrides_with(config: &mut WebpilotConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = get("OPENAI_API_KEY") {
        config.agent.api_key = Some(Secret::new(key));
    }
    if let Some(key) = get("AIML_API_KEY") {
        config.cleaner.api_key = Some(Secret::new(key));
    }
    if let Some(endpoint) = get("AIML_API_ENDPOINT") {
        config.cleaner.base_url = endpoint.trim_end_matches('/').to_string();
    }
    if let Some(raw) = get("WEBPILOT_MOCK") {
        match parse_bool(&raw) {
            Some(enabled) => config.mock.enabled = enabled,
            None => warn!(value = %raw, "ignoring unrecognised WEBPILOT_MOCK value"),
        }
    }
    if let Some(raw) = get("WEBPILOT_PORT") {
        match raw.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(e) => warn!(value = %raw, error = %e, "ignoring invalid WEBPILOT_PORT"),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_config(raw: &str, path: &Path) -> Result<WebpilotConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => toml::from_str(raw).map_err(|e| Error::parse("toml", e)),
        "yaml" | "yml" => serde_yaml::from_str(raw).map_err(|e| Error::parse("yaml", e)),
        "json" => serde_json::from_str(raw).map_err(|e| Error::parse("json", e)),
        _ => Err(Error::message(format!("unsupported config format: .{ext}"))),
    }
}
