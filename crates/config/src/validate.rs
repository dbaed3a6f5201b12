//! Semantic checks on a loaded configuration.

use crate::schema::WebpilotConfig;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "mock.delay_min_ms"
    pub path: &'static str,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.path, self.message)
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(&mut self, severity: Severity, path: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            path,
            message: message.into(),
        });
    }
}

/// Validate `config`. Live-mode credential checks only apply when mock mode
/// is off.
#[must_use]
pub fn validate(config: &WebpilotConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if config.mock.delay_min_ms > config.mock.delay_max_ms {
        result.push(
            Severity::Error,
            "mock.delay_min_ms",
            format!(
                "delay_min_ms ({}) is greater than delay_max_ms ({})",
                config.mock.delay_min_ms, config.mock.delay_max_ms
            ),
        );
    }

    if config.browser.remote_debug_port == 0 {
        result.push(
            Severity::Error,
            "browser.remote_debug_port",
            "remote debugging port must be non-zero",
        );
    }

    if config.browser.profile_directory.trim().is_empty() {
        result.push(
            Severity::Warning,
            "browser.profile_directory",
            "empty profile directory; the browser will use its default profile",
        );
    }

    if config.agent.max_content_chars == 0 {
        result.push(
            Severity::Warning,
            "agent.max_content_chars",
            "page content will be empty for the agent",
        );
    }

    if config.agent.has_unresolved_api_key() {
        result.push(
            Severity::Warning,
            "agent.api_key",
            "api_key references an environment variable that is not set",
        );
    }
    if config.cleaner.has_unresolved_api_key() {
        result.push(
            Severity::Warning,
            "cleaner.api_key",
            "api_key references an environment variable that is not set",
        );
    }

    if !config.is_mock() {
        if !config.agent.has_api_key() {
            result.push(
                Severity::Warning,
                "agent.api_key",
                "live mode without an agent API key; tasks will be rejected (set OPENAI_API_KEY)",
            );
        }
        if !config.cleaner.has_api_key() {
            result.push(
                Severity::Info,
                "cleaner.api_key",
                "no cleaner API key; instructions are sent to the agent unmodified",
            );
        }
    }

    result
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, secrecy::Secret};

    #[test]
    fn default_config_is_clean() {
        let result = validate(&WebpilotConfig::default());
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn inverted_delay_range_is_an_error() {
        let mut cfg = WebpilotConfig::default();
        cfg.mock.delay_min_ms = 2000;
        cfg.mock.delay_max_ms = 1000;
        let result = validate(&cfg);
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].path, "mock.delay_min_ms");
    }

    #[test]
    fn zero_debug_port_is_an_error() {
        let mut cfg = WebpilotConfig::default();
        cfg.browser.remote_debug_port = 0;
        assert!(validate(&cfg).has_errors());
    }

    #[test]
    fn live_mode_reports_missing_keys() {
        let mut cfg = WebpilotConfig::default();
        cfg.mock.enabled = false;
        let result = validate(&cfg);
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.count(Severity::Info), 1);

        cfg.agent.api_key = Some(Secret::new("sk".into()));
        cfg.cleaner.api_key = Some(Secret::new("aiml".into()));
        assert!(validate(&cfg).diagnostics.is_empty());
    }

    #[test]
    fn unresolved_key_is_reported_in_any_mode() {
        let mut cfg = WebpilotConfig::default();
        cfg.cleaner.api_key = Some(Secret::new("${AIML_API_KEY}".into()));
        let result = validate(&cfg);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].path, "cleaner.api_key");
        assert!(result.diagnostics[0].message.contains("not set"));

        cfg.mock.enabled = false;
        cfg.agent.api_key = Some(Secret::new("${OPENAI_API_KEY}".into()));
        let result = validate(&cfg);
        let agent: Vec<_> = result
            .diagnostics
            .iter()
            .filter(|d| d.path == "agent.api_key")
            .collect();
        assert_eq!(agent.len(), 2);
        assert!(agent.iter().any(|d| d.message.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic {
            severity: Severity::Warning,
            path: "agent.api_key",
            message: "missing".into(),
        };
        assert_eq!(d.to_string(), "warning [agent.api_key] missing");
    }
}
