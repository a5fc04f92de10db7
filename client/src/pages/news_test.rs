use super::*;

#[test]
fn post_card_links_to_detail_and_fills_defaults() {
    let post = NewsSummary { news_id: "NWS00001".to_owned(), ..NewsSummary::default() };
    let html = post_card("http://localhost:8080", post).to_html();
    assert!(html.contains(r#"href="/news/NWS00001""#));
    assert!(html.contains("Untitled Post"));
    assert!(html.contains("By Admin"));
    assert!(html.contains("No summary available."));
    assert!(html.contains(crate::config::DEFAULT_NEWS_IMAGE));
}

#[test]
fn category_list_shows_post_counts() {
    let categories = vec![NewsCategory { category_name: "Promo".to_owned(), post_count: 3, ..NewsCategory::default() }];
    assert!(category_list(categories).to_html().contains("Promo (3)"));
}

#[test]
fn category_list_reports_empty_sidebar() {
    assert!(category_list(Vec::new()).to_html().contains("No categories found."));
}
