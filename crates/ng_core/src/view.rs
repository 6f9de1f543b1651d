//! What a front end needs to draw one page of the grid.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::date::{self, DATE_PLACEHOLDER};
use crate::pager;
use crate::types::{Article, Feed};

/// Image shown for articles that carry none.
pub const FALLBACK_IMAGE: &str = "/favicon.ico";
pub const AUTHOR_PLACEHOLDER: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleCard {
    pub url: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    /// Timestamp as delivered, for front ends that format it themselves.
    pub published_at: String,
    pub published: String,
}

impl ArticleCard {
    /// Card with `published` rendered in `tz`.
    pub fn new_in<Tz: TimeZone>(article: &Article, tz: &Tz) -> Self {
        Self {
            url: article.url.clone(),
            title: article.title.clone(),
            author: article
                .author
                .clone()
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| AUTHOR_PLACEHOLDER.to_string()),
            image_url: article
                .image_url
                .clone()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
            published_at: article.published_at.clone(),
            published: date::format_or_in(&article.published_at, tz, DATE_PLACEHOLDER),
        }
    }

    /// Re-renders `published` in `tz`.
    pub fn localize<Tz: TimeZone>(&mut self, tz: &Tz) {
        self.published = date::format_or_in(&self.published_at, tz, DATE_PLACEHOLDER);
    }
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        Self::new_in(article, &Local)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub feed: Feed,
    pub page: u64,
    pub page_size: usize,
    pub page_count: u64,
    pub total_results: u64,
    pub offset: u64,
    pub articles: Vec<ArticleCard>,
}

impl PageView {
    pub fn new(
        feed: Feed,
        page: u64,
        page_size: usize,
        total_results: u64,
        window: &[Article],
    ) -> Self {
        Self {
            feed,
            page,
            page_size,
            page_count: pager::page_count(Some(total_results), page_size),
            total_results,
            offset: page.saturating_mul(page_size as u64),
            articles: window.iter().map(ArticleCard::from).collect(),
        }
    }

    /// Re-renders every card's date in `tz`.
    pub fn localize<Tz: TimeZone>(&mut self, tz: &Tz) {
        for card in &mut self.articles {
            card.localize(tz);
        }
    }

    /// An empty feed: no pages and nothing to show.
    pub fn empty(feed: Feed, page_size: usize) -> Self {
        Self::new(feed, 0, page_size, 0, &[])
    }
}
