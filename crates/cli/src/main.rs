mod browser_commands;
mod config_commands;
mod task_commands;

use std::{path::PathBuf, sync::Arc};

use {
    clap::{Parser, Subcommand},
    tracing::{info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
    webpilot_browser::{CdpBrowserAgent, LocalBrowserProcess},
    webpilot_config::WebpilotConfig,
    webpilot_gateway::{ExecutionMode, GatewayState, TaskService, TaskServices},
    webpilot_providers::{ChatClient, LlmTaskCleaner},
};

#[derive(Parser)]
#[command(name = "webpilot", about = "webpilot: browser automation API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,
    /// Port to listen on (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,
    /// Config file to load instead of searching the standard locations.
    #[arg(long, global = true, env = "WEBPILOT_CONFIG")]
    config: Option<PathBuf>,
    /// Answer tasks from fixtures.
    #[arg(long, global = true, conflicts_with = "live")]
    mock: bool,
    /// Drive a real browser with LLM help.
    #[arg(long, global = true)]
    live: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API (default when no subcommand is provided).
    Gateway,
    /// Execute one task and print the JSON response.
    Run {
        task: String,
        /// Skip LLM cleaning of the task text.
        #[arg(long)]
        no_clean: bool,
    },
    /// Show which fixture a task routes to.
    Classify { task: String },
    /// Control the local browser.
    Browser {
        #[command(subcommand)]
        action: browser_commands::BrowserAction,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Load config from `--config` or the standard locations, then apply the
/// mode and address flags.
fn load_config(cli: &Cli) -> anyhow::Result<WebpilotConfig> {
    let mut config = match cli.config {
        Some(ref path) => webpilot_config::load_config(path)?,
        None => webpilot_config::discover_and_load(),
    };
    if cli.mock {
        config.mock.enabled = true;
    } else if cli.live {
        config.mock.enabled = false;
    }
    if let Some(ref bind) = cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    Ok(config)
}

/// Wire the task service. The browser process backs `/start-chrome` and
/// `/stop-chrome` in both modes; LLM collaborators are only built live.
fn build_task_service(config: &WebpilotConfig) -> TaskService {
    let mode = ExecutionMode::from_config(config);
    let mut services = TaskServices::noop(config.browser.remote_debug_port)
        .with_process(Arc::new(LocalBrowserProcess::new(config.browser.clone())));

    if !mode.is_mock() {
        if let Some(client) = ChatClient::from_cleaner_config(&config.cleaner) {
            services = services.with_cleaner(Arc::new(LlmTaskCleaner::new(client)));
        }
        if let Some(agent) = CdpBrowserAgent::from_config(&config.agent) {
            services = services.with_agent(Arc::new(agent));
        }
    }

    TaskService::new(mode, services)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "webpilot starting");

    let config = load_config(&cli)?;

    match cli.command {
        None | Some(Commands::Gateway) => {
            let report = webpilot_config::validate(&config);
            for d in &report.diagnostics {
                warn!(diagnostic = %d, "config issue");
            }
            let service = build_task_service(&config);
            webpilot_gateway::start_gateway(
                &config.server.bind,
                config.server.port,
                GatewayState::new(service),
            )
            .await
        },
        Some(Commands::Run { task, no_clean }) => {
            task_commands::run(&build_task_service(&config), task, no_clean).await
        },
        Some(Commands::Classify { task }) => task_commands::classify(&task),
        Some(Commands::Browser { action }) => browser_commands::handle_browser(action, &config).await,
        Some(Commands::Config { action }) => config_commands::handle_config(action, cli.config.as_deref(), &config),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, webpilot_gateway::TaskError, webpilot_protocol::TaskRequest};

    /// Parse a live-mode file without applying process env overrides.
    fn live_config(agent_key: &str) -> WebpilotConfig {
        let raw = format!(
            "[mock]\nenabled = false\n\n[agent]\napi_key = \"{agent_key}\"\n\n\
             [browser]\nremote_debug_port = 9555\n"
        );
        toml::from_str(&webpilot_config::env_subst::substitute_env(&raw)).unwrap()
    }

    #[tokio::test]
    async fn unset_key_placeholder_rejects_live_tasks() {
        let config = live_config("${WEBPILOT_TEST_UNSET_AGENT_KEY}");
        let service = build_task_service(&config);

        assert!(!service.mode().is_mock());
        assert!(!service.services().agent.is_configured());
        let err = service
            .execute(&TaskRequest::new("check the news"))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::MissingCredential("OPENAI_API_KEY")));
    }

    #[test]
    fn configured_key_wires_the_agent() {
        let service = build_task_service(&live_config("sk-test"));
        assert!(service.services().agent.is_configured());
        assert_eq!(service.services().process.debug_port(), 9555);
    }

    #[test]
    fn mock_mode_keeps_llm_collaborators_noop() {
        let service = build_task_service(&WebpilotConfig::default());
        assert!(service.mode().is_mock());
        assert!(!service.services().agent.is_configured());
        assert!(!service.services().cleaner.is_configured());
        assert_eq!(service.services().process.endpoint(), "http://127.0.0.1:9422");
    }
}
