//! Instruction cleaning through an LLM.

use {
    async_trait::async_trait,
    tracing::{info, warn},
    webpilot_service_traits::TaskCleaner,
};

use crate::openai::{ChatClient, ChatMessage};

const CLEANER_SYSTEM_PROMPT: &str = "You are an AI agent that controls a web browser. \
Rewrite the user's request as one short, unambiguous instruction a browser automation agent \
can carry out: name the website or search to use and the information to report back. \
Reply with the instruction only, no commentary.";

/// [`TaskCleaner`] backed by a chat-completions model. Falls back to the
/// original text on any failure.
pub struct LlmTaskCleaner {
    client: ChatClient,
}

impl LlmTaskCleaner {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskCleaner for LlmTaskCleaner {
    async fn clean(&self, task: &str) -> String {
        let messages = [
            ChatMessage::system(CLEANER_SYSTEM_PROMPT),
            ChatMessage::user(task),
        ];
        match self.client.complete(&messages).await {
            Ok(cleaned) => {
                info!(model = self.client.model(), original = task, cleaned = %cleaned, "cleaned task");
                cleaned
            },
            Err(e) => {
                warn!(model = self.client.model(), error = %e, "LLM cleaning failed, using original task");
                task.to_string()
            },
        }
    }
}
