//! Config errors share the workspace-wide error type.

pub use webpilot_common::{Error, Result};

webpilot_common::impl_context!();
