//! Order history with a status filter.

use leptos::prelude::*;

use crate::components::account_sidebar::AccountSidebar;
use crate::net::types::Order;
use crate::state::orders::{OrdersState, status_badge};
use crate::state::session::AppSession;
use crate::util::format::{format_date, format_price, payment_method_label};

#[cfg(test)]
#[path = "account_orders_test.rs"]
mod account_orders_test;

const LOAD_FAILED: &str = "Failed to load orders.";

/// One `<option>` per status, valued and labelled by the status text.
fn status_options(statuses: Vec<String>) -> impl IntoView {
    statuses
        .into_iter()
        .map(|status| {
            let value = status.clone();
            view! { <option value=value>{status}</option> }
        })
        .collect_view()
}

fn order_card(order: Order) -> impl IntoView {
    let badge = format!("order-card__status order-card__status--{}", status_badge(&order.order_status));
    let items = order
        .order_items
        .into_iter()
        .map(|item| {
            view! {
                <li>
                    <span>{format!("{} x{}", item.product_title_snapshot, item.quantity)}</span>
                    <span>{format_price(Some(item.price_at_order))}</span>
                </li>
            }
        })
        .collect_view();
    view! {
        <article class="order-card">
            <header class="order-card__header">
                <strong>{format!("#{}", order.order_id)}</strong>
                <span>{format_date(order.order_date_time.as_deref())}</span>
                <span class=badge>{order.order_status.clone()}</span>
            </header>
            <ul class="order-card__items">{items}</ul>
            <footer class="order-card__footer">
                <span>{payment_method_label(&order.payment_method).to_owned()}</span>
                <strong>{format_price(Some(order.grand_total))}</strong>
            </footer>
        </article>
    }
}

#[component]
pub fn AccountOrdersPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let orders = RwSignal::new(OrdersState::default());

    Effect::new(move || {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            let Some(token) = session.token() else { return };
            match session.api().list_orders(&token).await {
                Ok(list) => orders.update(|o| o.load(list)),
                Err(e) => {
                    if let Some(msg) = session.error_message(&e, LOAD_FAILED) {
                        orders.update(|o| o.fail(msg));
                    }
                }
            }
        });
    });

    let filter_options = move || status_options(orders.with(OrdersState::statuses));

    view! {
        <div class="account">
            <AccountSidebar/>
            <div class="account__content">
                <h1>"My orders"</h1>
                <select
                    class="account__filter"
                    on:change=move |ev| orders.update(|o| o.set_filter(&event_target_value(&ev)))
                >
                    <option value="all">"All statuses"</option>
                    {filter_options}
                </select>
                {move || {
                    orders.with(|o| {
                        if o.loading {
                            return view! { <p>"Loading orders..."</p> }.into_any();
                        }
                        if let Some(err) = &o.error {
                            return view! { <p class="account__notice account__notice--error">{err.clone()}</p> }.into_any();
                        }
                        let visible = o.visible();
                        if visible.is_empty() {
                            return view! { <p>"No orders yet."</p> }.into_any();
                        }
                        visible.into_iter().map(order_card).collect_view().into_any()
                    })
                }}
            </div>
        </div>
    }
}
