//! Checkout page: address, payment method, notes, and proof of payment.
//!
//! Rendered behind `ProtectedRoute`, so a token is present on mount.

use leptos::html::Input;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::ProofOfPayment;
use crate::net::types::Address;
use crate::pages::cart::load_cart;
use crate::state::cart::CartState;
use crate::state::checkout::{
    CheckoutForm, PaymentMethod, TRANSFER_ACCOUNT_NAME, TRANSFER_ACCOUNT_NUMBER, TRANSFER_BANK,
};
use crate::state::session::AppSession;
use crate::util::format::format_price;

const ADDRESSES_FAILED: &str = "Failed to load addresses.";
const ORDER_FAILED: &str = "Failed to place order.";

/// File picked in the proof-of-payment input, if any.
fn picked_proof(input: NodeRef<Input>) -> Option<ProofOfPayment> {
    #[cfg(feature = "hydrate")]
    {
        let file = input.get_untracked()?.files()?.get(0)?;
        Some(ProofOfPayment { name: file.name(), file })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = input;
        None
    }
}

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();

    let cart = RwSignal::new(CartState::default());
    let addresses = RwSignal::new(Vec::<Address>::new());
    let form = RwSignal::new(CheckoutForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let proof_input = NodeRef::<Input>::new();

    let fetch_session = session.clone();
    Effect::new(move || {
        let session = fetch_session.clone();
        leptos::task::spawn_local(async move {
            load_cart(&session, cart).await;
            let Some(token) = session.token() else { return };
            match session.api().list_addresses(&token).await {
                Ok(list) => {
                    session.set_has_address(!list.is_empty());
                    form.update(|f| f.sync_addresses(&list));
                    addresses.set(list);
                }
                Err(e) => {
                    if let Some(msg) = session.error_message(&e, ADDRESSES_FAILED) {
                        error.set(Some(msg));
                    }
                }
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        let cart_is_empty = cart.with_untracked(CartState::is_empty);
        let payload = match form.with_untracked(|f| f.build_payload(cart_is_empty)) {
            Ok(payload) => payload,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        let Some(token) = session.token() else { return };
        let proof = if form.with_untracked(|f| f.payment_method == PaymentMethod::BankTransfer) {
            picked_proof(proof_input)
        } else {
            None
        };
        busy.set(true);

        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match session.api().create_order(&token, &payload, proof).await {
                Ok(_) => navigate("/account/orders", NavigateOptions::default()),
                Err(e) => {
                    if let Some(msg) = session.error_message(&e, ORDER_FAILED) {
                        error.set(Some(msg));
                    }
                }
            }
            busy.set(false);
        });
    };

    let on_proof_change = move |_| {
        let picked = picked_proof(proof_input).is_some();
        form.update(|f| f.has_proof = picked);
    };

    let address_options = move || {
        let list = addresses.get();
        if list.is_empty() {
            return view! {
                <p class="checkout__hint">
                    "No saved address yet. "
                    <a href="/account/address?add=1">"Add one"</a>
                </p>
            }
                .into_any();
        }
        list.into_iter()
            .map(|address| {
                let id = address.address_id;
                let label = format!("{}: {}", address.title, address.one_line());
                view! {
                    <label class="checkout__address">
                        <input
                            type="radio"
                            name="address"
                            prop:checked=move || form.with(|f| f.address_id == Some(id))
                            on:change=move |_| form.update(|f| f.address_id = Some(id))
                        />
                        <span>{label}</span>
                    </label>
                }
            })
            .collect_view()
            .into_any()
    };

    let payment_options = PaymentMethod::ALL
        .into_iter()
        .map(|method| {
            view! {
                <label class="checkout__payment">
                    <input
                        type="radio"
                        name="payment"
                        prop:checked=move || form.with(|f| f.payment_method == method)
                        on:change=move |_| {
                            form.update(|f| {
                                f.payment_method = method;
                                f.has_proof = false;
                            });
                        }
                    />
                    <span>{method.label()}</span>
                </label>
            }
        })
        .collect_view();

    let summary = move || {
        cart.with(|c| {
            if c.loading {
                return view! { <p>"Loading cart..."</p> }.into_any();
            }
            let rows = c
                .items
                .iter()
                .map(|item| {
                    view! {
                        <li>
                            <span>{format!("{} x{}", item.title, item.quantity)}</span>
                            <span>{format_price(Some(item.line_total()))}</span>
                        </li>
                    }
                })
                .collect_view();
            view! {
                <ul class="checkout__items">{rows}</ul>
                <p class="checkout__total">"Total: " {format_price(Some(c.subtotal()))}</p>
            }
                .into_any()
        })
    };

    let bank_transfer = move || form.with(|f| f.payment_method == PaymentMethod::BankTransfer);

    view! {
        <div class="checkout">
            <h1>"Checkout"</h1>
            <Show when=move || error.get().is_some()>
                <div class="checkout__error">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <form class="checkout__form" on:submit=on_submit>
                <section>
                    <h2>"Shipping address"</h2>
                    {address_options}
                </section>
                <section>
                    <h2>"Payment method"</h2>
                    {payment_options}
                    <Show when=bank_transfer>
                        <div class="checkout__bank">
                            <p>{format!("{TRANSFER_BANK} {TRANSFER_ACCOUNT_NUMBER}")}</p>
                            <p>{format!("a.n. {TRANSFER_ACCOUNT_NAME}")}</p>
                            <label>
                                "Proof of payment"
                                <input type="file" accept="image/*,application/pdf" node_ref=proof_input on:change=on_proof_change/>
                            </label>
                        </div>
                    </Show>
                </section>
                <section>
                    <h2>"Notes"</h2>
                    <textarea
                        prop:value=move || form.with(|f| f.notes.clone())
                        on:input=move |ev| form.update(|f| f.notes = event_target_value(&ev))
                    ></textarea>
                </section>
                <section>
                    <h2>"Order summary"</h2>
                    {summary}
                </section>
                <button class="checkout__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Placing order..." } else { "Place order" }}
                </button>
            </form>
        </div>
    }
}
