use super::*;
use crate::net::types::MessageResponse;

#[test]
fn bearer_header_formats_token() {
    assert_eq!(bearer_header("abc"), "Bearer abc");
}

#[test]
fn resource_endpoints_format_expected_paths() {
    assert_eq!(product_endpoint(" SKU123 "), "/products/SKU123");
    assert_eq!(address_endpoint(7), "/user/addresses/7");
    assert_eq!(cart_item_endpoint(12), "/user/cart/12");
}

#[test]
fn news_endpoints_carry_page_and_limit() {
    assert_eq!(news_list_endpoint(2, 5), "/news?page=2&limit=5");
    assert_eq!(news_list_endpoint(0, 5), "/news?page=1&limit=5");
    assert_eq!(news_endpoint(" NWS00001 "), "/news/NWS00001");
}

#[test]
fn decode_response_parses_success_body() {
    let msg: MessageResponse = decode_response(201, r#"{"message":"Alamat berhasil ditambahkan"}"#).unwrap();
    assert_eq!(msg.message.as_deref(), Some("Alamat berhasil ditambahkan"));
}

#[test]
fn decode_response_treats_empty_success_body_as_empty_object() {
    let msg: MessageResponse = decode_response(204, "  ").unwrap();
    assert_eq!(msg.message, None);
}

#[test]
fn decode_response_maps_unauthorized() {
    let err = decode_response::<MessageResponse>(401, r#"{"error":"token expired"}"#).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), Some("token expired"));
}

#[test]
fn decode_response_reports_malformed_success_body() {
    let err = decode_response::<MessageResponse>(200, "not json").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn http_api_is_unavailable_outside_browser() {
    let api = HttpApi::new(ApiConfig::with_base_url(None));
    let result = futures::executor::block_on(api.list_products());
    assert_eq!(result, Err(ApiError::Unavailable));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn news_requests_are_unavailable_outside_browser() {
    let api = HttpApi::new(ApiConfig::with_base_url(None));
    assert_eq!(futures::executor::block_on(api.list_news(1, 5)), Err(ApiError::Unavailable));
    assert_eq!(futures::executor::block_on(api.news_detail("NWS00001")), Err(ApiError::Unavailable));
}
