//! Configuration loading, env substitution, env overrides and validation.
//!
//! Config files: `webpilot.toml`, `webpilot.yaml`, `webpilot.yml` or
//! `webpilot.json`, searched in `./` then `~/.config/webpilot/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{apply_env_overrides, config_dir, discover_and_load, find_config_file, load_config},
    schema::{
        AgentConfig, BrowserConfig, CleanerConfig, MockConfig, ServerConfig, WebpilotConfig,
    },
    validate::{Diagnostic, Severity, ValidationResult, validate},
};
