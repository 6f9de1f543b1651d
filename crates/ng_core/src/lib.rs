pub mod date;
pub mod error;
pub mod fetch;
pub mod pager;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use fetch::ArticleFetcher;
pub use pager::{page_count, request_page, window_for, PagerState, DEFAULT_PAGE_SIZE};
pub use types::{Article, ArticleSource, Feed, ResultSet};
pub use view::{ArticleCard, PageView};

pub mod prelude {
    pub use crate::{Article, ArticleFetcher, Error, Feed, PagerState, Result, ResultSet};
}
