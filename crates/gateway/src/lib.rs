//! Gateway: the HTTP API in front of the task service.
//!
//! Lifecycle:
//! 1. Load + validate config
//! 2. Pick the execution mode and wire collaborators (LLM ones are noop in
//!    mock mode)
//! 3. Build the router and serve it
//!
//! Browser and LLM work lives in other crates and reaches the gateway only
//! through the traits in `webpilot-service-traits`.

pub mod samples;
pub mod server;
pub mod services;
pub mod state;
pub mod task_service;

pub use {
    server::{AppState, build_gateway_app, start_gateway},
    services::TaskServices,
    state::GatewayState,
    task_service::{ExecutionMode, MockOptions, TaskError, TaskService},
};
