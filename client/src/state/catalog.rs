//! Product catalog state: category filter and pagination.
//!
//! DESIGN
//! ======
//! The full product list is fetched once; filtering and paging are done in
//! memory. Changing the category always returns to page one.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::config::PRODUCTS_PER_PAGE;
use crate::net::types::{Product, ProductCategory, ProductListResponse};

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub categories: Vec<ProductCategory>,
    /// `None` shows every category.
    pub active_category: Option<String>,
    /// 1-based.
    pub page: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self { products: Vec::new(), categories: Vec::new(), active_category: None, page: 1, loading: true, error: None }
    }
}

impl CatalogState {
    pub fn load(&mut self, response: ProductListResponse) {
        self.products = response.products;
        self.categories = response.categories;
        self.page = 1;
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn filtered(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| match &self.active_category {
                Some(category) => p.category_name.as_deref() == Some(category.as_str()),
                None => true,
            })
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(PRODUCTS_PER_PAGE)
    }

    /// Products on the current page.
    pub fn page_items(&self) -> Vec<Product> {
        self.filtered()
            .into_iter()
            .skip((self.page.max(1) - 1) * PRODUCTS_PER_PAGE)
            .take(PRODUCTS_PER_PAGE)
            .cloned()
            .collect()
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.active_category = category.filter(|c| !c.is_empty());
        self.page = 1;
    }

    /// Move to `page` if it exists and differs from the current one.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() || page == self.page {
            return false;
        }
        self.page = page;
        true
    }
}
