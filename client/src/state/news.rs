//! News listing state: server-side pagination plus the category sidebar.
//!
//! Unlike the catalog, paging happens on the server. The page number lives
//! in the `?page=` query so links and reloads land on the same page.

#[cfg(test)]
#[path = "news_test.rs"]
mod news_test;

use crate::net::types::{NewsCategory, NewsListResponse, NewsSummary};

#[derive(Clone, Debug, PartialEq)]
pub struct NewsState {
    pub posts: Vec<NewsSummary>,
    pub categories: Vec<NewsCategory>,
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for NewsState {
    fn default() -> Self {
        Self { posts: Vec::new(), categories: Vec::new(), page: 1, total_pages: 1, loading: true, error: None }
    }
}

/// Page number from a `?page=` value. Missing, malformed, or zero means 1.
pub fn page_from_query(raw: Option<&str>) -> usize {
    raw.and_then(|p| p.trim().parse::<usize>().ok()).filter(|p| *p > 0).unwrap_or(1)
}

impl NewsState {
    /// Start fetching `page`. The previous posts stay visible until the
    /// response lands.
    pub fn begin(&mut self, page: usize) {
        self.page = page.max(1);
        self.loading = true;
        self.error = None;
    }

    pub fn load(&mut self, response: NewsListResponse) {
        self.posts = response.news;
        self.categories = response.categories;
        self.total_pages = response
            .pagination
            .map_or(1, |p| usize::try_from(p.total_pages).unwrap_or(usize::MAX))
            .max(1);
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn has_pagination(&self) -> bool {
        self.total_pages > 1
    }

    /// `page` if it is in range and not the current one.
    pub fn target_page(&self, page: usize) -> Option<usize> {
        (page >= 1 && page <= self.total_pages && page != self.page).then_some(page)
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }
}

/// Link for a listing page.
pub fn page_href(page: usize) -> String {
    format!("/news?page={}", page.max(1))
}
