use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Country used for top headlines when none is configured.
pub const DEFAULT_COUNTRY: &str = "in";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// One article as delivered by the news service.
///
/// Field names follow the upstream JSON so a result set can be passed
/// through without remapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, rename = "urlToImage")]
    pub image_url: Option<String>,
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ArticleSource>,
}

/// One response page: the total number of matches and the articles returned.
///
/// `articles.len()` may be smaller than `total_results`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl ResultSet {
    pub fn new(total_results: u64, articles: Vec<Article>) -> Self {
        Self {
            total_results,
            articles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// What is being browsed: the headline landing page or a topic search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Feed {
    TopHeadlines { country: String },
    Topic(String),
}

impl Feed {
    pub fn top_headlines(country: impl Into<String>) -> Self {
        Feed::TopHeadlines {
            country: country.into(),
        }
    }

    pub fn topic(topic: impl Into<String>) -> Self {
        Feed::Topic(topic.into())
    }

    /// Key under which results for this feed are cached.
    pub fn cache_key(&self) -> String {
        match self {
            Feed::TopHeadlines { country } => format!("top/{}", country),
            Feed::Topic(topic) => format!("topic/{}", topic.to_lowercase()),
        }
    }
}

impl Default for Feed {
    fn default() -> Self {
        Feed::top_headlines(DEFAULT_COUNTRY)
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::TopHeadlines { country } => write!(f, "top headlines ({})", country),
            Feed::Topic(topic) => write!(f, "{}", topic),
        }
    }
}

impl FromStr for Feed {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "" | "top" | "top-headlines" => Feed::default(),
            topic => Feed::topic(topic),
        })
    }
}
