use super::*;

#[test]
fn format_price_groups_thousands() {
    assert_eq!(format_price(Some(1_250_000.0)), "Rp 1.250.000");
    assert_eq!(format_price(Some(999.0)), "Rp 999");
    assert_eq!(format_price(Some(1000.0)), "Rp 1.000");
    assert_eq!(format_price(Some(0.0)), "Rp 0");
}

#[test]
fn format_price_rounds_to_whole_rupiah() {
    assert_eq!(format_price(Some(15_999.6)), "Rp 16.000");
}

#[test]
fn format_price_handles_missing_and_negative() {
    assert_eq!(format_price(None), "Rp -");
    assert_eq!(format_price(Some(f64::NAN)), "Rp -");
    assert_eq!(format_price(Some(-25_000.0)), "Rp -25.000");
}

#[test]
fn asset_url_resolves_relative_paths() {
    assert_eq!(
        asset_url("http://localhost:8080/", Some("/uploads/p1.jpg")),
        "http://localhost:8080/uploads/p1.jpg"
    );
    assert_eq!(asset_url("http://localhost:8080", Some("uploads/p1.jpg")), "http://localhost:8080/uploads/p1.jpg");
}

#[test]
fn asset_url_keeps_absolute_and_defaults_empty() {
    assert_eq!(asset_url("http://x", Some("https://cdn.test/a.png")), "https://cdn.test/a.png");
    assert_eq!(asset_url("http://x", Some("  ")), DEFAULT_PRODUCT_IMAGE);
    assert_eq!(asset_url("http://x", None), DEFAULT_PRODUCT_IMAGE);
}

#[test]
fn format_date_keeps_date_part() {
    assert_eq!(format_date(Some("2024-05-01T10:00:00Z")), "2024-05-01");
    assert_eq!(format_date(Some("2024-05-01")), "2024-05-01");
    assert_eq!(format_date(None), "-");
}

#[test]
fn payment_method_label_maps_known_codes() {
    assert_eq!(payment_method_label("bank_transfer"), "Bank Transfer");
    assert_eq!(payment_method_label("cod"), "Cash on Delivery");
    assert_eq!(payment_method_label("ewallet"), "ewallet");
}

#[test]
fn payment_method_label_borrows_from_owned_code() {
    let code = String::from("qris");
    let label = payment_method_label(&code);
    assert_eq!(label, "qris");
    let known = String::from("cod");
    assert_eq!(payment_method_label(&known), "Cash on Delivery");
}

#[test]
fn news_image_url_uses_blog_placeholder() {
    assert_eq!(news_image_url("http://x", None), DEFAULT_NEWS_IMAGE);
    assert_eq!(news_image_url("http://x/", Some("uploads/n1.jpg")), "http://x/uploads/n1.jpg");
}
