//! Landing page: hero banner plus a handful of featured products.

use leptos::prelude::*;

use crate::components::product_card::ProductCard;
use crate::net::types::Product;
use crate::state::session::AppSession;

const FEATURED_COUNT: usize = 4;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let featured = RwSignal::new(Vec::<Product>::new());

    // Effects only run in the browser, so the server renders the empty grid.
    Effect::new(move || {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.api().list_products().await {
                Ok(resp) => featured.set(resp.products.into_iter().take(FEATURED_COUNT).collect()),
                Err(e) => leptos::logging::warn!("featured products unavailable: {e}"),
            }
        });
    });

    view! {
        <div class="home-page">
            <section class="home-hero">
                <h1>"Building materials, delivered."</h1>
                <p>"Browse the catalog, add to cart, and check out with bank transfer or cash on delivery."</p>
                <a class="home-hero__cta" href="/products">"Shop now"</a>
            </section>
            <section class="home-featured">
                <h2>"Featured products"</h2>
                <div class="product-grid">
                    {move || {
                        featured
                            .get()
                            .into_iter()
                            .map(|product| view! { <ProductCard product/> })
                            .collect_view()
                    }}
                </div>
            </section>
        </div>
    }
}
