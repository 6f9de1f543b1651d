use ng_core::pager::DEFAULT_PAGE_SIZE;
use ng_core::types::DEFAULT_COUNTRY;
use ng_core::{Error, Feed, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
/// Largest page the news service hands out per request.
pub const DEFAULT_FETCH_SIZE: usize = 100;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Topic tabs offered next to the top headlines.
pub const DEFAULT_TOPICS: &[&str] = &[
    "business",
    "entertainment",
    "health",
    "science",
    "sports",
    "technology",
];

#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub country: String,
    pub page_size: usize,
    pub fetch_size: usize,
    pub cache_ttl: Duration,
    pub topics: Vec<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("country", &self.country)
            .field("page_size", &self.page_size)
            .field("fetch_size", &self.fetch_size)
            .field("cache_ttl", &self.cache_ttl)
            .field("topics", &self.topics)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            fetch_size: DEFAULT_FETCH_SIZE,
            cache_ttl: DEFAULT_CACHE_TTL,
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Feed selected by a topic string, with top headlines using the
    /// configured country.
    pub fn feed(&self, topic: Option<&str>) -> Feed {
        match topic.map(|t| t.parse::<Feed>()) {
            Some(Ok(Feed::Topic(topic))) => Feed::Topic(topic),
            _ => Feed::top_headlines(self.country.clone()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(Error::Config(
                    "News API key is required (set NEWS_API_KEY)".to_string(),
                ))
            }
        }
        Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        if self.page_size == 0 {
            return Err(Error::InvalidPageSize(self.page_size));
        }
        if self.fetch_size == 0 || self.fetch_size % self.page_size != 0 {
            return Err(Error::Config(format!(
                "Fetch size {} must be a positive multiple of the page size {}",
                self.fetch_size, self.page_size
            )));
        }
        Ok(())
    }
}
