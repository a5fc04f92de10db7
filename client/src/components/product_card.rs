//! Catalog grid tile.

use leptos::prelude::*;

use crate::net::types::Product;
use crate::state::session::AppSession;
use crate::util::format::{asset_url, format_price};

#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let session = expect_context::<AppSession>();
    let image = asset_url(&session.api().config().base_url, product.primary_image());
    let href = format!("/products/{}", product.product_sku);
    let price = format_price(product.regular_price);
    let out_of_stock = product.stock.is_some_and(|s| s <= 0);

    view! {
        <a class="product-card" href=href>
            <img class="product-card__image" src=image alt=product.title.clone() loading="lazy"/>
            <div class="product-card__body">
                <span class="product-card__category">{product.category_name.clone().unwrap_or_default()}</span>
                <h3 class="product-card__title">{product.title.clone()}</h3>
                <span class="product-card__price">{price}</span>
                <Show when=move || out_of_stock>
                    <span class="product-card__badge">"Out of stock"</span>
                </Show>
            </div>
        </a>
    }
}
