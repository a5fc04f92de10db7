//! Single product view with quantity selector and add-to-cart.
//!
//! Adding to the cart while logged out opens the login modal with this page
//! as the pending redirect, so the customer lands back here afterwards.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_params_map};

use crate::net::types::{AddToCartRequest, Product};
use crate::state::modal::{ActiveModal, ModalCommand, ModalState, RouteLocation};
use crate::state::session::AppSession;
use crate::util::format::{asset_url, format_price};
use crate::util::validation::parse_quantity;

const LOAD_FAILED: &str = "Failed to load product.";
const ADD_FAILED: &str = "Failed to add to cart.";
const ADDED: &str = "Added to cart.";

#[derive(Clone, Debug, PartialEq)]
enum Detail {
    Loading,
    Found(Product),
    Missing,
    Failed(String),
}

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let modal = expect_context::<RwSignal<ModalState>>();
    let params = use_params_map();
    let location = use_location();
    let base_url = session.api().config().base_url.clone();

    let detail = RwSignal::new(Detail::Loading);
    let quantity = RwSignal::new(1_u64);
    let notice = RwSignal::new(None::<Result<String, String>>);
    let busy = RwSignal::new(false);

    let sku = move || params.read().get("sku").unwrap_or_default();

    let fetch_session = session.clone();
    Effect::new(move || {
        let sku = sku();
        detail.set(Detail::Loading);
        quantity.set(1);
        notice.set(None);
        let session = fetch_session.clone();
        leptos::task::spawn_local(async move {
            let next = match session.api().product_detail(&sku).await {
                Ok(Some(product)) => Detail::Found(product),
                Ok(None) => Detail::Missing,
                Err(e) => {
                    leptos::logging::warn!("product {sku} failed to load: {e}");
                    Detail::Failed(e.user_message(LOAD_FAILED))
                }
            };
            detail.set(next);
        });
    });

    let add_to_cart = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        let Some(token) = session.token() else {
            let here = RouteLocation::new(
                location.pathname.get_untracked(),
                location.search.get_untracked(),
                location.hash.get_untracked(),
            );
            modal.update(|m| m.dispatch(ModalCommand::Open { modal: ActiveModal::Login, redirect_from: Some(here) }));
            return;
        };
        let request = AddToCartRequest { product_sku: sku(), quantity: quantity.get_untracked() };
        busy.set(true);
        notice.set(None);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.api().add_to_cart(&token, &request).await {
                Ok(resp) => notice.set(Some(Ok(resp.message.unwrap_or_else(|| ADDED.to_owned())))),
                Err(e) => {
                    if let Some(msg) = session.error_message(&e, ADD_FAILED) {
                        notice.set(Some(Err(msg)));
                    }
                }
            }
            busy.set(false);
        });
    });

    let on_quantity = move |ev: leptos::ev::Event| {
        // Out-of-range input snaps back to the last valid value.
        if let Ok(qty) = parse_quantity(&event_target_value(&ev)) {
            quantity.set(qty);
        } else {
            quantity.update(|q| *q = (*q).max(1));
        }
    };

    view! {
        <div class="product-detail">
            {move || match detail.get() {
                Detail::Loading => view! { <p class="product-detail__status">"Loading product..."</p> }.into_any(),
                Detail::Missing => {
                    view! {
                        <div class="product-detail__status">
                            <p>"Product not found."</p>
                            <a href="/products">"Back to products"</a>
                        </div>
                    }
                        .into_any()
                }
                Detail::Failed(err) => {
                    view! { <p class="product-detail__status product-detail__status--error">{err}</p> }.into_any()
                }
                Detail::Found(product) => {
                    let image = asset_url(&base_url, product.primary_image());
                    let in_stock = product.stock.is_none_or(|s| s > 0);
                    view! {
                        <div class="product-detail__layout">
                            <img class="product-detail__image" src=image alt=product.title.clone()/>
                            <div class="product-detail__info">
                                <span class="product-detail__category">
                                    {product.category_name.clone().unwrap_or_default()}
                                </span>
                                <h1>{product.title.clone()}</h1>
                                <p class="product-detail__price">{format_price(product.regular_price)}</p>
                                <p class="product-detail__sku">{format!("SKU: {}", product.product_sku)}</p>
                                <p class="product-detail__description">{product.descriptions.clone().unwrap_or_default()}</p>
                                <div class="product-detail__actions">
                                    <button
                                        class="product-detail__step"
                                        on:click=move |_| quantity.update(|q| *q = q.saturating_sub(1).max(1))
                                    >
                                        "-"
                                    </button>
                                    <input
                                        class="product-detail__quantity"
                                        type="number"
                                        min="1"
                                        prop:value=move || quantity.get().to_string()
                                        on:change=on_quantity
                                    />
                                    <button class="product-detail__step" on:click=move |_| quantity.update(|q| *q += 1)>
                                        "+"
                                    </button>
                                    <button
                                        class="product-detail__add"
                                        disabled=move || busy.get() || !in_stock
                                        on:click=move |_| add_to_cart.run(())
                                    >
                                        {move || if busy.get() { "Adding..." } else { "Add to cart" }}
                                    </button>
                                </div>
                                {move || {
                                    notice
                                        .get()
                                        .map(|notice| match notice {
                                            Ok(msg) => view! { <p class="product-detail__notice">{msg}</p> }.into_any(),
                                            Err(msg) => {
                                                view! { <p class="product-detail__notice product-detail__notice--error">{msg}</p> }
                                                    .into_any()
                                            }
                                        })
                                }}
                            </div>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
