use super::*;

#[test]
fn with_base_url_defaults_when_missing_or_blank() {
    assert_eq!(ApiConfig::with_base_url(None).base_url, DEFAULT_API_BASE_URL);
    assert_eq!(ApiConfig::with_base_url(Some("   ")).base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn with_base_url_trims_trailing_slashes() {
    let cfg = ApiConfig::with_base_url(Some(" https://api.example.test/ "));
    assert_eq!(cfg.base_url, "https://api.example.test");
}

#[test]
fn endpoint_joins_with_single_slash() {
    let cfg = ApiConfig::with_base_url(Some("https://api.example.test/"));
    assert_eq!(cfg.endpoint("/user/login"), "https://api.example.test/user/login");
    assert_eq!(cfg.endpoint("products"), "https://api.example.test/products");
}
