//! CLI subcommands for driving the local browser.

use {
    anyhow::Result,
    clap::Subcommand,
    webpilot_browser::{LocalBrowserProcess, detect},
    webpilot_config::WebpilotConfig,
    webpilot_service_traits::BrowserProcess,
};

#[derive(Subcommand)]
pub enum BrowserAction {
    /// Launch the browser with remote debugging enabled.
    Start,
    /// Kill every running instance of the browser.
    Stop,
    /// Show which browser binary would be used.
    Detect,
}

pub async fn handle_browser(action: BrowserAction, config: &WebpilotConfig) -> Result<()> {
    match action {
        BrowserAction::Start => {
            let process = LocalBrowserProcess::new(config.browser.clone());
            process.start().await?;
            println!("Browser started; debugging endpoint {}", process.endpoint());
            Ok(())
        },
        BrowserAction::Stop => {
            LocalBrowserProcess::new(config.browser.clone()).stop().await?;
            println!("Browser stopped.");
            Ok(())
        },
        BrowserAction::Detect => {
            detect_browser(config);
            Ok(())
        },
    }
}

fn detect_browser(config: &WebpilotConfig) {
    let browser = &config.browser;
    match detect::detect_browser(browser.chrome_path.as_deref()) {
        Some(found) => {
            println!("Browser:        {} ({:?})", found.path.display(), found.source);
        },
        None => {
            eprintln!("{}", detect::install_hint());
        },
    }
    println!("  debug port:   {}", browser.remote_debug_port);
    println!("  user data:    {}", browser.resolved_user_data_dir().display());
    println!("  profile:      {}", browser.profile_directory);
}
