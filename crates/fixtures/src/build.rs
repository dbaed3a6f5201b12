//! Shaping a fixture into a task result.

use {serde::Serialize, webpilot_protocol::TaskResponse};

use crate::{
    catalog::{TopicKey, fixture},
    classify::classify,
};

/// Everything a mock run reports about the page it "visited".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredResult {
    pub topic: TopicKey,
    pub url: String,
    pub title: String,
    pub html_content: String,
    pub summary: String,
    pub steps: Vec<String>,
}

/// Build the result for a topic.
#[must_use]
pub fn build(topic: TopicKey) -> StructuredResult {
    let record = fixture(topic);
    StructuredResult {
        topic,
        url: record.locator.to_string(),
        title: record.title.to_string(),
        html_content: record.content.to_string(),
        summary: record.summary.to_string(),
        steps: vec![
            format!("Navigated to {}", record.locator),
            "Waited for page to load".to_string(),
            "Extracted page content".to_string(),
            "Analyzed and summarized results".to_string(),
        ],
    }
}

/// Classify `task` and build its result.
#[must_use]
pub fn respond(task: &str) -> StructuredResult {
    build(classify(task))
}

impl From<StructuredResult> for TaskResponse {
    fn from(result: StructuredResult) -> Self {
        TaskResponse::success(result.summary)
            .with_url(result.url)
            .with_title(result.title)
            .with_html_content(result.html_content)
            .with_steps(result.steps)
    }
}
