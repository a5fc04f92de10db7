//! Cart page: line items, quantity steppers, removal, and totals.

use leptos::prelude::*;

use crate::net::types::CartItem;
use crate::state::cart::CartState;
use crate::state::modal::{ActiveModal, ModalCommand, ModalState, RouteLocation};
use crate::state::session::{AppSession, Session};
use crate::util::format::{asset_url, format_price};

const LOAD_FAILED: &str = "Failed to load cart items.";
const UPDATE_FAILED: &str = "Failed to update quantity.";
const REMOVE_FAILED: &str = "Failed to remove item.";

/// Fetch the cart into `cart`. Shared with checkout.
pub(crate) async fn load_cart(session: &AppSession, cart: RwSignal<CartState>) {
    let Some(token) = session.token() else {
        cart.update(|c| c.load(Vec::new()));
        return;
    };
    let result = session.api().list_cart(&token).await;
    // A logout or re-login while in flight owns the cart now.
    if !session.state().with_untracked(|s| s.holds_token(&token)) {
        return;
    }
    match result {
        Ok(items) => cart.update(|c| c.load(items)),
        Err(e) => {
            if let Some(msg) = session.error_message(&e, LOAD_FAILED) {
                cart.update(|c| c.fail(msg));
            }
        }
    }
}

#[component]
pub fn CartPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let modal = expect_context::<RwSignal<ModalState>>();
    let state = session.state();
    let cart = RwSignal::new(CartState::default());
    let base_url = session.api().config().base_url.clone();

    // Refetch when the settled token changes, not on profile updates.
    let fetch_key = Memo::new(move |_| state.with(Session::settled_token));
    let fetch_session = session.clone();
    Effect::new(move || {
        let Some(token) = fetch_key.get() else {
            return;
        };
        let session = fetch_session.clone();
        cart.update(|c| c.loading = token.is_some());
        leptos::task::spawn_local(async move { load_cart(&session, cart).await });
    });

    let change_quantity = {
        let session = session.clone();
        Callback::new(move |(cart_id, quantity): (u64, u64)| {
            if quantity == 0 || cart.with_untracked(|c| c.busy_item.is_some()) {
                return;
            }
            let Some(token) = session.token() else { return };
            cart.update(|c| c.busy_item = Some(cart_id));
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match session.api().update_cart_quantity(&token, cart_id, quantity).await {
                    Ok(_) => cart.update(|c| {
                        c.set_quantity(cart_id, quantity);
                        c.busy_item = None;
                        c.error = None;
                    }),
                    Err(e) => match session.error_message(&e, UPDATE_FAILED) {
                        Some(msg) => cart.update(|c| c.fail(msg)),
                        None => cart.update(|c| c.busy_item = None),
                    },
                }
            });
        })
    };

    let remove_item = {
        let session = session.clone();
        Callback::new(move |cart_id: u64| {
            if cart.with_untracked(|c| c.busy_item.is_some()) {
                return;
            }
            let Some(token) = session.token() else { return };
            cart.update(|c| c.busy_item = Some(cart_id));
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match session.api().remove_cart_item(&token, cart_id).await {
                    Ok(_) => cart.update(|c| {
                        c.remove(cart_id);
                        c.busy_item = None;
                        c.error = None;
                    }),
                    Err(e) => match session.error_message(&e, REMOVE_FAILED) {
                        Some(msg) => cart.update(|c| c.fail(msg)),
                        None => cart.update(|c| c.busy_item = None),
                    },
                }
            });
        })
    };

    let request_login = move |_| {
        let here = RouteLocation::new("/cart", "", "");
        modal.update(|m| m.dispatch(ModalCommand::Open { modal: ActiveModal::Login, redirect_from: Some(here) }));
    };

    let row = move |item: CartItem| {
        let id = item.cart_id;
        let qty = item.quantity;
        let at_min = qty <= 1;
        let busy = move || cart.with(|c| c.busy_item == Some(id));
        view! {
            <div class="cart__row">
                <img class="cart__image" src=asset_url(&base_url, item.image.as_deref()) alt=item.title.clone()/>
                <div class="cart__info">
                    <a href=format!("/products/{}", item.product_sku)>{item.title.clone()}</a>
                    <span>{format_price(Some(item.regular_price))}</span>
                </div>
                <div class="cart__quantity">
                    <button disabled=move || busy() || at_min on:click=move |_| change_quantity.run((id, qty - 1))>
                        "-"
                    </button>
                    <span>{qty}</span>
                    <button disabled=busy on:click=move |_| change_quantity.run((id, qty + 1))>
                        "+"
                    </button>
                </div>
                <span class="cart__line-total">{format_price(Some(item.line_total()))}</span>
                <button class="cart__remove" disabled=busy on:click=move |_| remove_item.run(id)>
                    "Remove"
                </button>
            </div>
        }
    };

    view! {
        <div class="cart">
            <h1>"Shopping cart"</h1>
            {move || {
                if state.with(|s| !s.is_loading && !s.is_logged_in()) {
                    return view! {
                        <div class="cart__status">
                            <p>"Please log in to view your cart."</p>
                            <button on:click=request_login>"Login"</button>
                        </div>
                    }
                        .into_any();
                }
                let snapshot = cart.get();
                if snapshot.loading {
                    return view! { <p class="cart__status">"Loading cart..."</p> }.into_any();
                }
                let error = snapshot.error.clone().map(|err| view! { <p class="cart__status cart__status--error">{err}</p> });
                if snapshot.is_empty() {
                    return view! {
                        {error}
                        <div class="cart__status">
                            <p>"Your cart is empty."</p>
                            <a href="/products">"Continue shopping"</a>
                        </div>
                    }
                        .into_any();
                }
                let subtotal = format_price(Some(snapshot.subtotal()));
                let count = snapshot.item_count();
                let row = row.clone();
                view! {
                    {error}
                    <div class="cart__rows">{snapshot.items.into_iter().map(row).collect_view()}</div>
                    <div class="cart__summary">
                        <span>{format!("{count} item(s)")}</span>
                        <strong>{subtotal}</strong>
                        <a class="cart__checkout" href="/checkout">"Proceed to checkout"</a>
                    </div>
                }
                    .into_any()
            }}
        </div>
    }
}
