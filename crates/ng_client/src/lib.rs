pub mod cache;
pub mod config;
pub mod logging;
pub mod newsapi;
pub mod session;

pub use cache::{CachedFetcher, QueryCache};
pub use config::ClientConfig;
pub use logging::init_logging;
pub use newsapi::NewsApiClient;
pub use session::BrowseSession;

use ng_core::{ArticleFetcher, Result};
use std::sync::Arc;

/// NewsAPI client behind a cache using the configured time-to-live.
pub fn create_fetcher(config: &ClientConfig) -> Result<Arc<dyn ArticleFetcher>> {
    let client = NewsApiClient::new(config)?;
    let cache = QueryCache::new(config.cache_ttl);
    Ok(Arc::new(CachedFetcher::new(client, cache)))
}

pub mod prelude {
    pub use super::{create_fetcher, BrowseSession, ClientConfig};
    pub use ng_core::{Article, ArticleFetcher, Error, Feed, PageView, Result, ResultSet};
}
