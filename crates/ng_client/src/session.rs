use ng_core::pager::window_at;
use ng_core::{ArticleFetcher, Error, Feed, PageView, PagerState, Result, ResultSet};
use std::sync::Arc;
use tracing::info;

use crate::config::ClientConfig;

/// One reader browsing one feed at a time.
///
/// Upstream pages hold `fetch_size` articles and are split locally into
/// pages of `page_size`.
pub struct BrowseSession {
    fetcher: Arc<dyn ArticleFetcher>,
    feed: Feed,
    pager: PagerState,
    fetch_size: usize,
}

impl BrowseSession {
    pub fn new(
        fetcher: Arc<dyn ArticleFetcher>,
        feed: Feed,
        page_size: usize,
        fetch_size: usize,
    ) -> Result<Self> {
        let pager = PagerState::new(page_size)?;
        if fetch_size == 0 || fetch_size % page_size != 0 {
            return Err(Error::Config(format!(
                "Fetch size {} must be a positive multiple of the page size {}",
                fetch_size, page_size
            )));
        }
        Ok(Self {
            fetcher,
            feed,
            pager,
            fetch_size,
        })
    }

    pub fn from_config(
        fetcher: Arc<dyn ArticleFetcher>,
        feed: Feed,
        config: &ClientConfig,
    ) -> Result<Self> {
        Self::new(fetcher, feed, config.page_size, config.fetch_size)
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn pager(&self) -> &PagerState {
        &self.pager
    }

    /// Changes tab: new feed, back to the first page.
    pub fn switch_feed(&mut self, feed: Feed) {
        info!("🗂️ Switching to {}", feed);
        self.feed = feed;
        self.pager.reset();
    }

    /// Shows the first page, or an empty view when the feed has no results.
    pub async fn open(&mut self) -> Result<PageView> {
        match self.go_to_page(0).await {
            Err(Error::InvalidPageRequest { .. }) => {
                self.pager.reset();
                Ok(PageView::empty(self.feed.clone(), self.pager.page_size()))
            }
            other => other,
        }
    }

    /// Moves to page `selected` and returns what it shows.
    ///
    /// The pager only advances once every fetch has succeeded.
    pub async fn go_to_page(&mut self, selected: u64) -> Result<PageView> {
        let first = self.fetcher.fetch_articles(&self.feed, 0).await?;
        let total = first.total_results;

        let mut next = self.pager;
        let offset = next.go_to(selected, total)?;

        let fetch_size = self.fetch_size as u64;
        let upstream_page = u32::try_from(offset / fetch_size)
            .map_err(|_| Error::InvalidPageRequest { selected })?;
        let result = if upstream_page == 0 {
            first
        } else {
            self.fetch_page(upstream_page).await?
        };

        let window = window_at(&result.articles, offset % fetch_size, next.page_size());
        self.pager = next;
        info!(
            "📄 {} page {}/{} ({} articles)",
            self.feed,
            next.current_page() + 1,
            ng_core::page_count(Some(total), next.page_size()),
            window.len()
        );
        Ok(PageView::new(
            self.feed.clone(),
            next.current_page(),
            next.page_size(),
            total,
            window,
        ))
    }

    pub async fn next_page(&mut self) -> Result<PageView> {
        let selected = self.pager.current_page().saturating_add(1);
        self.go_to_page(selected).await
    }

    async fn fetch_page(&self, page: u32) -> Result<ResultSet> {
        self.fetcher.fetch_articles(&self.feed, page).await
    }
}
