use async_trait::async_trait;
use std::sync::Arc;

use crate::types::{Feed, ResultSet};
use crate::Result;

#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Returns the name of the news source
    fn name(&self) -> &str;

    /// Fetches one 0-based page of results for `feed`
    async fn fetch_articles(&self, feed: &Feed, page: u32) -> Result<ResultSet>;
}

#[async_trait]
impl<F: ArticleFetcher + ?Sized> ArticleFetcher for Arc<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_articles(&self, feed: &Feed, page: u32) -> Result<ResultSet> {
        (**self).fetch_articles(feed, page).await
    }
}
