//! Shared error definitions and helpers used across all webpilot crates.

pub mod error;

pub use error::{Error, FromMessage, Result};
