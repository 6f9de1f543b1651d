//! Page arithmetic over a result set.
//!
//! Offsets are absolute article indexes into the full set of matches the
//! news service reports through `total_results`.

use crate::types::{Article, ResultSet};
use crate::{Error, Result};

/// Articles shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// The cursor a browsing session holds: a fixed page size and the page
/// currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerState {
    page_size: usize,
    current_page: u64,
}

impl PagerState {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize(page_size));
        }
        Ok(Self {
            page_size,
            current_page: 0,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn offset(&self) -> u64 {
        self.current_page.saturating_mul(self.page_size as u64)
    }

    /// Moves to `selected`, wrapping past the last page the same way
    /// [`request_page`] does, and returns the new page's offset. A wrapped
    /// offset that falls inside a page lands on the start of that page.
    /// The state is left untouched on error.
    pub fn go_to(&mut self, selected: u64, total_results: u64) -> Result<u64> {
        let offset = request_page(selected, total_results, self.page_size)?;
        self.current_page = offset / self.page_size as u64;
        tracing::debug!(
            "User requested page number {}, which is offset {}",
            selected,
            offset
        );
        Ok(self.offset())
    }

    pub fn reset(&mut self) {
        self.current_page = 0;
    }
}

impl Default for PagerState {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 0,
        }
    }
}

/// Visible articles for the pager's current page. Empty when the offset is
/// past the loaded articles.
pub fn window_for<'a>(result_set: &'a ResultSet, state: &PagerState) -> &'a [Article] {
    window_at(&result_set.articles, state.offset(), state.page_size())
}

/// `page_size` articles starting at `offset`, clipped to what is available.
pub fn window_at(articles: &[Article], offset: u64, page_size: usize) -> &[Article] {
    let start = match usize::try_from(offset) {
        Ok(start) if start < articles.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(articles.len());
    tracing::debug!("Loading items from {} to {}", start, end);
    &articles[start..end]
}

/// Number of pages needed for `total_results`; zero when the total is zero
/// or not known.
pub fn page_count(total_results: Option<u64>, page_size: usize) -> u64 {
    match total_results {
        Some(total) if page_size > 0 => total.div_ceil(page_size as u64),
        _ => 0,
    }
}

/// Offset of the first article on page `selected`.
///
/// Indexes past the last page wrap around modulo `total_results` instead of
/// failing. An empty result set has no pages, so any request against it is
/// rejected.
pub fn request_page(selected: u64, total_results: u64, page_size: usize) -> Result<u64> {
    if total_results == 0 {
        return Err(Error::InvalidPageRequest { selected });
    }
    let offset = (selected as u128 * page_size as u128) % total_results as u128;
    // Always below total_results, which is a u64.
    Ok(offset as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                url: format!("https://example.com/{}", i),
                title: format!("Article {}", i),
                author: None,
                image_url: None,
                published_at: "2024-03-05T09:07:02Z".to_string(),
                description: None,
                content: None,
                source: None,
            })
            .collect()
    }

    fn state_on(page: u64, page_size: usize) -> PagerState {
        PagerState {
            page_size,
            current_page: page,
        }
    }

    #[test]
    fn test_page_size_must_be_positive() {
        assert!(matches!(PagerState::new(0), Err(Error::InvalidPageSize(0))));
        assert_eq!(PagerState::new(20).unwrap(), PagerState::default());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(Some(45), 20), 3);
        assert_eq!(page_count(Some(40), 20), 2);
        assert_eq!(page_count(Some(1), 20), 1);
        assert_eq!(page_count(Some(0), 20), 0);
        assert_eq!(page_count(None, 20), 0);
        assert_eq!(page_count(Some(10), 0), 0);
    }

    #[test]
    fn test_page_count_matches_ceiling_division() {
        for total in 0..200u64 {
            for size in 1..25usize {
                let expected = (total as f64 / size as f64).ceil() as u64;
                assert_eq!(page_count(Some(total), size), expected);
            }
        }
    }

    #[test]
    fn test_window_full_page() {
        let set = ResultSet::new(45, articles(45));
        let window = window_for(&set, &state_on(1, 20));
        assert_eq!(window.len(), 20);
        assert_eq!(window[0].url, "https://example.com/20");
        assert_eq!(window[19].url, "https://example.com/39");
    }

    #[test]
    fn test_window_clipped_last_page() {
        let set = ResultSet::new(45, articles(45));
        let window = window_for(&set, &state_on(2, 20));
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].url, "https://example.com/40");
        assert_eq!(window[4].url, "https://example.com/44");
    }

    #[test]
    fn test_window_sizes() {
        for len in 0..60usize {
            let set = ResultSet::new(len as u64, articles(len));
            for page in 0..4u64 {
                let state = state_on(page, 20);
                let offset = state.offset() as usize;
                let window = window_for(&set, &state);
                if offset < len {
                    assert_eq!(window.len(), 20usize.min(len - offset));
                    assert_eq!(window, &set.articles[offset..offset + window.len()]);
                } else {
                    assert!(window.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_window_past_loaded_articles_is_empty() {
        // total_results can exceed what a single response carried
        let set = ResultSet::new(300, articles(20));
        assert!(window_for(&set, &state_on(1, 20)).is_empty());
        assert!(window_for(&set, &state_on(u64::MAX, 20)).is_empty());
    }

    #[test]
    fn test_request_page() {
        assert_eq!(request_page(2, 45, 20).unwrap(), 40);
        assert_eq!(request_page(0, 45, 20).unwrap(), 0);
        assert_eq!(request_page(1, 45, 20).unwrap(), 20);
    }

    #[test]
    fn test_request_page_wraps() {
        // 3 * 20 = 60, 60 mod 45 = 15
        assert_eq!(request_page(3, 45, 20).unwrap(), 15);
        assert!(request_page(u64::MAX, 45, usize::MAX).unwrap() < 45);
    }

    #[test]
    fn test_request_page_empty_set() {
        assert!(matches!(
            request_page(0, 0, 20),
            Err(Error::InvalidPageRequest { selected: 0 })
        ));
    }

    #[test]
    fn test_go_to_keeps_offset_in_range() {
        let mut state = PagerState::default();
        assert_eq!(state.go_to(2, 45).unwrap(), 40);
        assert_eq!(state.current_page(), 2);
        assert!(state.offset() < 45);

        // 60 mod 45 = 15, which is inside page 0
        assert_eq!(state.go_to(3, 45).unwrap(), 0);
        assert_eq!(state.current_page(), 0);
    }

    #[test]
    fn test_go_to_does_not_advance_on_error() {
        let mut state = PagerState::default();
        state.go_to(1, 45).unwrap();
        assert!(state.go_to(2, 0).is_err());
        assert_eq!(state.current_page(), 1);

        state.reset();
        assert_eq!(state.current_page(), 0);
    }

    #[test]
    fn test_pure_functions_are_repeatable() {
        let set = ResultSet::new(45, articles(45));
        let state = state_on(1, 20);
        assert_eq!(window_for(&set, &state), window_for(&set, &state));
        assert_eq!(page_count(Some(45), 20), page_count(Some(45), 20));
        assert_eq!(
            request_page(5, 45, 20).unwrap(),
            request_page(5, 45, 20).unwrap()
        );
    }
}
