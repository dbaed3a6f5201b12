//! Keyword routing from free-text tasks to topics.

use crate::catalog::TopicKey;

/// Keyword groups in priority order. The first group with any keyword
/// contained in the lower-cased task wins, so a task mentioning both
/// "weather" and "github" routes to [`TopicKey::Weather`].
const KEYWORD_GROUPS: &[(TopicKey, &[&str])] = &[
    (TopicKey::Weather, &["weather", "temperature", "forecast"]),
    (TopicKey::News, &["news", "hacker news", "hn", "headlines"]),
    (TopicKey::Wiki, &["wiki", "wikipedia", "search", "what is"]),
    (TopicKey::Stocks, &["stock", "market", "finance", "price"]),
    (TopicKey::Github, &["github", "trending", "repository", "repo"]),
];

/// Classify a task into a topic. Never fails; unmatched input (including
/// the empty string) resolves to [`TopicKey::Default`].
#[must_use]
pub fn classify(task: &str) -> TopicKey {
    let task = task.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| task.contains(k)))
        .map_or(TopicKey::Default, |(topic, _)| *topic)
}
