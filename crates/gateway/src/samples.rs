//! Example tasks offered to frontends.

use webpilot_protocol::{SampleQueries, SampleQuery};

const SAMPLES: &[(&str, &str, &str)] = &[
    (
        "Weather",
        "What's the weather like today?",
        "Get current weather conditions",
    ),
    (
        "News",
        "Show me the latest tech news",
        "View trending stories from Hacker News",
    ),
    (
        "Finance",
        "Check the stock market",
        "View market indices and top movers",
    ),
    (
        "Wikipedia",
        "What is artificial intelligence?",
        "Search Wikipedia for information",
    ),
    (
        "GitHub",
        "Show trending repositories on GitHub",
        "View popular open source projects",
    ),
];

pub fn sample_queries() -> SampleQueries {
    SampleQueries {
        queries: SAMPLES
            .iter()
            .map(|(category, query, description)| SampleQuery {
                category: (*category).to_string(),
                query: (*query).to_string(),
                description: (*description).to_string(),
            })
            .collect(),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use webpilot_fixtures::{TopicKey, classify};

    use super::*;

    #[test]
    fn five_samples_in_order() {
        let categories: Vec<_> = sample_queries()
            .queries
            .into_iter()
            .map(|q| q.category)
            .collect();
        assert_eq!(categories, ["Weather", "News", "Finance", "Wikipedia", "GitHub"]);
    }

    #[test]
    fn every_sample_routes_to_a_real_fixture() {
        let topics: Vec<_> = sample_queries()
            .queries
            .iter()
            .map(|q| classify(&q.query))
            .collect();
        assert!(!topics.contains(&TopicKey::Default));
        assert_eq!(topics[0], TopicKey::Weather);
        assert_eq!(topics[1], TopicKey::News);
    }
}
