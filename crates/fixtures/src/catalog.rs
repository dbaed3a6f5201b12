//! Fixture catalog: one canned page per topic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Topic a task is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicKey {
    Weather,
    News,
    Wiki,
    Stocks,
    Github,
    /// Catch-all for tasks that match no keyword group.
    Default,
}

impl TopicKey {
    pub const ALL: [TopicKey; 6] = [
        Self::Weather,
        Self::News,
        Self::Wiki,
        Self::Stocks,
        Self::Github,
        Self::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::News => "news",
            Self::Wiki => "wiki",
            Self::Stocks => "stocks",
            Self::Github => "github",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canned "website".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureRecord {
    pub locator: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub summary: &'static str,
}

impl FixtureRecord {
    const fn new(
        locator: &'static str,
        title: &'static str,
        content: &'static str,
        summary: &'static str,
    ) -> Self {
        Self {
            locator,
            title,
            content,
            summary,
        }
    }
}

/// Look up the fixture for a topic. Total: every topic has exactly one.
#[must_use]
pub fn fixture(topic: TopicKey) -> &'static FixtureRecord {
    match topic {
        TopicKey::Weather => &WEATHER,
        TopicKey::News => &NEWS,
        TopicKey::Wiki => &WIKIPEDIA,
        TopicKey::Stocks => &STOCKS,
        TopicKey::Github => &GITHUB,
        TopicKey::Default => &DEFAULT,
    }
}

const WEATHER: FixtureRecord = FixtureRecord::new(
    "https://weather.com",
    "Weather.com - Current Conditions",
    r#"
<div class="weather-card">
    <h1>San Francisco, CA</h1>
    <div class="temperature">68°F</div>
    <div class="condition">Partly Cloudy</div>
    <div class="details">
        <span>Humidity: 65%</span>
        <span>Wind: 12 mph W</span>
        <span>UV Index: 5</span>
    </div>
    <div class="forecast">
        <div class="day">Mon: 72°/58°</div>
        <div class="day">Tue: 70°/56°</div>
        <div class="day">Wed: 68°/54°</div>
    </div>
</div>
"#,
    "Current weather in San Francisco: 68°F, Partly Cloudy. Humidity 65%, Wind 12 mph from the West.",
);

const NEWS: FixtureRecord = FixtureRecord::new(
    "https://news.ycombinator.com",
    "Hacker News",
    r#"
<div class="news-feed">
    <article class="story">
        <h2>1. New AI Model Achieves Breakthrough in Code Generation</h2>
        <span class="meta">423 points | 156 comments | 3 hours ago</span>
    </article>
    <article class="story">
        <h2>2. Show HN: Open-source alternative to popular SaaS tools</h2>
        <span class="meta">287 points | 89 comments | 5 hours ago</span>
    </article>
    <article class="story">
        <h2>3. The Future of WebAssembly in 2026</h2>
        <span class="meta">198 points | 72 comments | 6 hours ago</span>
    </article>
    <article class="story">
        <h2>4. How We Scaled Our Database to Handle 1M Requests/sec</h2>
        <span class="meta">156 points | 45 comments | 8 hours ago</span>
    </article>
</div>
"#,
    "Top stories: AI breakthrough in code generation (423 pts), Open-source SaaS alternative (287 pts), WebAssembly future (198 pts).",
);

const WIKIPEDIA: FixtureRecord = FixtureRecord::new(
    "https://wikipedia.org",
    "Wikipedia - The Free Encyclopedia",
    r#"
<div class="wiki-article">
    <h1>Artificial Intelligence</h1>
    <p class="intro">Artificial intelligence (AI) is the simulation of human intelligence processes by machines,
    especially computer systems. These processes include learning, reasoning, and self-correction.</p>
    <h2>History</h2>
    <p>The field of AI research was founded at a workshop at Dartmouth College in 1956.</p>
    <h2>Applications</h2>
    <ul>
        <li>Natural Language Processing</li>
        <li>Computer Vision</li>
        <li>Robotics</li>
        <li>Expert Systems</li>
    </ul>
</div>
"#,
    "Wikipedia article on Artificial Intelligence - covers history from 1956 Dartmouth workshop, and applications including NLP, Computer Vision, Robotics.",
);

const STOCKS: FixtureRecord = FixtureRecord::new(
    "https://finance.yahoo.com",
    "Yahoo Finance - Stock Market",
    r#"
<div class="market-summary">
    <h1>Market Summary</h1>
    <div class="indices">
        <div class="index positive">S&P 500: 5,234.18 (+0.82%)</div>
        <div class="index positive">NASDAQ: 16,891.45 (+1.12%)</div>
        <div class="index positive">DOW: 39,156.78 (+0.45%)</div>
    </div>
    <h2>Top Movers</h2>
    <div class="stocks">
        <div class="stock">NVDA: $892.45 (+4.2%)</div>
        <div class="stock">AAPL: $198.76 (+1.8%)</div>
        <div class="stock">MSFT: $421.32 (+2.1%)</div>
        <div class="stock">GOOGL: $156.89 (+1.5%)</div>
    </div>
</div>
"#,
    "Markets up today. S&P 500 +0.82%, NASDAQ +1.12%, DOW +0.45%. Top movers: NVDA +4.2%, AAPL +1.8%, MSFT +2.1%.",
);

const GITHUB: FixtureRecord = FixtureRecord::new(
    "https://github.com/trending",
    "GitHub Trending Repositories",
    r#"
<div class="trending-repos">
    <h1>Trending Repositories</h1>
    <div class="repo">
        <h2>anthropics/claude-code</h2>
        <p>Official CLI tool for Claude AI assistant</p>
        <span class="stars">⭐ 12,456 stars today</span>
    </div>
    <div class="repo">
        <h2>openai/whisper</h2>
        <p>Robust Speech Recognition via Large-Scale Weak Supervision</p>
        <span class="stars">⭐ 8,234 stars today</span>
    </div>
    <div class="repo">
        <h2>vercel/next.js</h2>
        <p>The React Framework for the Web</p>
        <span class="stars">⭐ 5,678 stars today</span>
    </div>
</div>
"#,
    "Trending on GitHub: claude-code (12.4k stars), whisper (8.2k stars), next.js (5.6k stars).",
);

const DEFAULT: FixtureRecord = FixtureRecord::new(
    "https://example.com",
    "Example Domain",
    r#"
<div class="example-page">
    <h1>Example Domain</h1>
    <p>This domain is for use in illustrative examples in documents.</p>
    <p>You may use this domain in literature without prior coordination or asking for permission.</p>
</div>
"#,
    "Successfully loaded the requested webpage and extracted the content.",
);

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_a_complete_fixture() {
        for topic in TopicKey::ALL {
            let record = fixture(topic);
            assert!(!record.locator.is_empty(), "{topic} locator");
            assert!(!record.title.is_empty(), "{topic} title");
            assert!(!record.content.trim().is_empty(), "{topic} content");
            assert!(!record.summary.is_empty(), "{topic} summary");
            assert!(record.locator.starts_with("https://"), "{topic} locator");
        }
    }

    #[test]
    fn locators_are_distinct() {
        let mut locators: Vec<_> = TopicKey::ALL.iter().map(|t| fixture(*t).locator).collect();
        locators.sort_unstable();
        locators.dedup();
        assert_eq!(locators.len(), TopicKey::ALL.len());
    }

    #[test]
    fn topic_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TopicKey::Github).unwrap(),
            "\"github\""
        );
        let topic: TopicKey = serde_json::from_str("\"default\"").unwrap();
        assert_eq!(topic, TopicKey::Default);
        assert_eq!(TopicKey::Wiki.to_string(), "wiki");
    }
}
