//! Live browser collaborators: a locally launched Chromium-based browser with
//! remote debugging, and a single-shot CDP agent that drives it.
//!
//! # Pieces
//!
//! - **detect**: find a Chromium-based browser binary on this machine
//! - **process**: start/stop the browser, clearing stale profile locks
//! - **page**: connect over CDP, open a URL, read title and text
//! - **agent**: pick a start URL with an LLM, read the page, answer the task
//!
//! # Example
//!
//! ```ignore
//! use webpilot_browser::{CdpBrowserAgent, LocalBrowserProcess};
//! use webpilot_service_traits::{BrowserAgent, BrowserProcess};
//!
//! let process = LocalBrowserProcess::new(config.browser.clone());
//! process.start().await?;
//! let answer = agent.run("top story on hacker news", &process.endpoint()).await?;
//! process.stop().await?;
//! ```

pub mod agent;
pub mod detect;
pub mod error;
pub mod page;
pub mod process;

pub use {
    agent::CdpBrowserAgent,
    error::BrowserError,
    page::PageSnapshot,
    process::LocalBrowserProcess,
};
