use async_trait::async_trait;
use ng_core::{ArticleFetcher, Error, Feed, Result, ResultSet};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;

const RATE_LIMITED: &str = "rateLimited";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: String,
    #[serde(flatten)]
    result: ResultSet,
}

/// Body the service sends with `"status": "error"`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Client for the NewsAPI v2 REST endpoints.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    fetch_size: usize,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("fetch_size", &self.fetch_size)
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: Client::new(),
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_size: config.fetch_size,
        })
    }

    fn request(&self, feed: &Feed, page: u32) -> reqwest::RequestBuilder {
        let (endpoint, key, value) = match feed {
            Feed::TopHeadlines { country } => ("top-headlines", "country", country.as_str()),
            Feed::Topic(topic) => ("everything", "q", topic.as_str()),
        };
        // the service numbers pages from 1
        let page = page.saturating_add(1).to_string();
        let page_size = self.fetch_size.to_string();

        self.client
            .get(format!("{}/{}", self.base_url, endpoint))
            .header("X-Api-Key", &self.api_key)
            .query(&[
                (key, value),
                ("page", page.as_str()),
                ("pageSize", page_size.as_str()),
            ])
    }
}

/// Maps a failed response onto the error the caller sees.
fn upstream_error(status: StatusCode, body: &str) -> Error {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let (code, message) = match parsed {
        Some(body) => (body.code, body.message),
        None => (String::new(), body.trim().to_string()),
    };

    if status == StatusCode::TOO_MANY_REQUESTS || code == RATE_LIMITED {
        return Error::RateLimited(message);
    }
    Error::Upstream {
        status: status.as_u16(),
        code,
        message,
    }
}

#[async_trait]
impl ArticleFetcher for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_articles(&self, feed: &Feed, page: u32) -> Result<ResultSet> {
        info!("📰 Fetching {} (page {})", feed, page);
        let response = self.request(feed, page).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = upstream_error(status, &body);
            warn!("⚠️ {} failed for {}: {}", self.name(), feed, err);
            return Err(err);
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        if envelope.status == "error" {
            return Err(upstream_error(status, &body));
        }
        let result = envelope.result;
        debug!(
            "Received {} of {} articles for {}",
            result.articles.len(),
            result.total_results,
            feed
        );
        Ok(result)
    }
}
