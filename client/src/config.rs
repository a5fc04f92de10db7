//! Build-time storefront configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle cannot read process env at runtime, so the API origin is
//! baked in at compile time from `STOREFRONT_API_URL`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// `localStorage` key holding the customer bearer token.
pub const TOKEN_STORAGE_KEY: &str = "customerAuthToken";

/// Minimum accepted password length for registration and password change.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Products shown per catalog page.
pub const PRODUCTS_PER_PAGE: usize = 12;

/// Placeholder image for products without a usable picture.
pub const DEFAULT_PRODUCT_IMAGE: &str = "/images/product/default-image.jpg";

/// News posts requested per page from `GET /news`.
pub const NEWS_PER_PAGE: usize = 5;

/// Placeholder image for news posts without a picture.
pub const DEFAULT_NEWS_IMAGE: &str = "/images/blog/default-blog.jpg";

/// Remote API settings shared by every request helper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Config baked into this build.
    pub fn from_build_env() -> Self {
        Self::with_base_url(option_env!("STOREFRONT_API_URL"))
    }

    /// Config for an explicit base URL; blank values use the default.
    pub fn with_base_url(raw: Option<&str>) -> Self {
        let base_url = raw
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        Self { base_url }
    }

    /// Absolute URL for an API path such as `/user/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
