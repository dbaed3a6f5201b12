//! LLM access for live mode: an OpenAI-compatible chat-completions client and
//! the task cleaner built on it.

pub mod cleaner;
pub mod openai;

pub use {
    cleaner::LlmTaskCleaner,
    openai::{ChatClient, ChatMessage, ProviderError},
};
