//! Display formatting for prices, dates, and asset URLs.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::config::{DEFAULT_NEWS_IMAGE, DEFAULT_PRODUCT_IMAGE};
use crate::state::checkout::PaymentMethod;

/// Rupiah with `.` thousands separators and no decimals, e.g. `Rp 1.250.000`.
/// Missing or non-finite prices render as `Rp -`.
pub fn format_price(price: Option<f64>) -> String {
    let Some(value) = price.filter(|p| p.is_finite()) else {
        return "Rp -".to_owned();
    };
    #[allow(clippy::cast_possible_truncation)]
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("Rp {sign}{grouped}")
}

/// Resolve an image path from the API against the asset origin.
///
/// Absolute URLs pass through; empty paths fall back to the placeholder.
pub fn asset_url(base_url: &str, path: Option<&str>) -> String {
    resolve_asset(base_url, path, DEFAULT_PRODUCT_IMAGE)
}

/// `asset_url` for news images, with the blog placeholder.
pub fn news_image_url(base_url: &str, path: Option<&str>) -> String {
    resolve_asset(base_url, path, DEFAULT_NEWS_IMAGE)
}

fn resolve_asset(base_url: &str, path: Option<&str>, fallback: &str) -> String {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return fallback.to_owned();
    };
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Date part of an ISO-8601 timestamp (`2024-05-01T10:00:00Z` -> `2024-05-01`).
pub fn format_date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => d.split('T').next().unwrap_or(d).to_owned(),
        None => "-".to_owned(),
    }
}

/// Human label for a payment method code.
pub fn payment_method_label<'a>(code: &'a str) -> &'a str {
    PaymentMethod::from_code(code).map_or(code, |m| m.label())
}
