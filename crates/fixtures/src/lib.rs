//! Canned website snapshots and the deterministic task router used by mock
//! mode.
//!
//! A free-text task is classified into a [`TopicKey`] by ordered keyword
//! matching, then the matching [`FixtureRecord`] is shaped into a
//! [`StructuredResult`] with a fixed four-step narrative.
//!
//! ```
//! use webpilot_fixtures::{TopicKey, classify, respond};
//!
//! assert_eq!(classify("What's the weather like today?"), TopicKey::Weather);
//! let result = respond("quantum physics");
//! assert_eq!(result.url, "https://example.com");
//! ```

pub mod build;
pub mod catalog;
pub mod classify;

pub use {
    build::{StructuredResult, build, respond},
    catalog::{FixtureRecord, TopicKey, fixture},
    classify::classify,
};
