// src/models/article.rs
// DOCUMENTATION: News article as returned by the lookup provider
// PURPOSE: Carry the provider payload through untouched

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A news article for a location
/// DOCUMENTATION: The provider owns this format, so any JSON value is accepted
/// and serialized back exactly as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article(pub Value);

impl Article {
    /// Headline, when the provider sent it as a string
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_round_trips_unchanged() {
        let raw = json!([
            {
                "title": "Storm hits coast",
                "link": "https://news.example/1",
                "published": "Tue, 10 Oct 2017 12:00:00 GMT",
                "source": {"name": "Example"}
            },
            {"title": null, "link": "https://news.example/2", "id": 1},
            {"title": {"text": "Storm"}, "link": ["https://a", "https://b"]},
            "bare headline",
            42
        ]);

        let articles: Vec<Article> = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(articles.len(), 5);
        assert_eq!(serde_json::to_value(&articles).unwrap(), raw);
    }

    #[test]
    fn test_title_only_for_strings() {
        assert_eq!(Article(json!({"title": "Storm"})).title(), Some("Storm"));
        assert_eq!(Article(json!({"title": null})).title(), None);
        assert_eq!(Article(json!({"title": {"text": "Storm"}})).title(), None);
        assert_eq!(Article(json!("Storm")).title(), None);
    }
}
