//! Saved addresses: list, add, and edit.
//!
//! Arriving with `?add=1` (the post-login redirect for customers without an
//! address) opens the add form straight away.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::account_sidebar::AccountSidebar;
use crate::net::types::{Address, AddressInput};
use crate::state::session::AppSession;
use crate::util::validation::validate_address;

const LOAD_FAILED: &str = "Failed to load addresses.";
const SAVE_FAILED: &str = "Failed to save address.";

/// Which form is showing, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Editor {
    Closed,
    Adding,
    Editing(u64),
}

async fn reload(session: &AppSession, addresses: RwSignal<Vec<Address>>, error: RwSignal<Option<String>>) {
    let Some(token) = session.token() else { return };
    match session.api().list_addresses(&token).await {
        Ok(list) => {
            session.set_has_address(!list.is_empty());
            addresses.set(list);
        }
        Err(e) => {
            if let Some(msg) = session.error_message(&e, LOAD_FAILED) {
                error.set(Some(msg));
            }
        }
    }
}

#[component]
pub fn AccountAddressPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let query = use_query_map();

    let addresses = RwSignal::new(Vec::<Address>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let editor = RwSignal::new(Editor::Closed);
    let input = RwSignal::new(AddressInput::default());
    let busy = RwSignal::new(false);

    let open_add = move || {
        input.set(AddressInput::default());
        error.set(None);
        editor.set(Editor::Adding);
    };

    Effect::new(move || {
        if query.read().get("add").as_deref() == Some("1") {
            open_add();
        }
    });

    let fetch_session = session.clone();
    Effect::new(move || {
        let session = fetch_session.clone();
        leptos::task::spawn_local(async move {
            reload(&session, addresses, error).await;
            loading.set(false);
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        let body = match input.with_untracked(validate_address) {
            Ok(body) => body,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        let Some(token) = session.token() else { return };
        let target = editor.get_untracked();
        busy.set(true);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            let result = match target {
                Editor::Editing(id) => session.api().update_address(&token, id, &body).await,
                Editor::Adding | Editor::Closed => session.api().add_address(&token, &body).await,
            };
            match result {
                Ok(_) => {
                    editor.set(Editor::Closed);
                    reload(&session, addresses, error).await;
                }
                Err(e) => {
                    if let Some(msg) = session.error_message(&e, SAVE_FAILED) {
                        error.set(Some(msg));
                    }
                }
            }
            busy.set(false);
        });
    };

    let field = move |label: &'static str, get: fn(&AddressInput) -> String, set: fn(&mut AddressInput, String)| {
        view! {
            <input
                placeholder=label
                prop:value=move || input.with(get)
                on:input=move |ev| input.update(|i| set(i, event_target_value(&ev)))
            />
        }
    };

    let form = move || {
        let heading = match editor.get() {
            Editor::Closed => return None,
            Editor::Adding => "New address",
            Editor::Editing(_) => "Edit address",
        };
        Some(view! {
            <form class="account__form" on:submit=on_submit.clone()>
                <h2>{heading}</h2>
                {field("Label (e.g. Home)", |i| i.title.clone(), |i, v| i.title = v)}
                {field("Street", |i| i.street.clone(), |i, v| i.street = v)}
                {field("Additional details", |i| i.additional.clone(), |i, v| i.additional = v)}
                {field("District / City", |i| i.district_city.clone(), |i, v| i.district_city = v)}
                {field("Province", |i| i.province.clone(), |i, v| i.province = v)}
                {field("Post code", |i| i.post_code.clone(), |i, v| i.post_code = v)}
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || input.with(|i| i.is_default)
                        on:change=move |ev| input.update(|i| i.is_default = event_target_checked(&ev))
                    />
                    "Use as default address"
                </label>
                <div class="account__actions">
                    <button type="submit" disabled=move || busy.get()>"Save"</button>
                    <button type="button" on:click=move |_| editor.set(Editor::Closed)>"Cancel"</button>
                </div>
            </form>
        })
    };

    let list = move || {
        if loading.get() {
            return view! { <p>"Loading addresses..."</p> }.into_any();
        }
        let list = addresses.get();
        if list.is_empty() {
            return view! { <p>"No saved addresses yet."</p> }.into_any();
        }
        list.into_iter()
            .map(|address| {
                let id = address.address_id;
                let is_default = address.is_default;
                let editable = AddressInput::from(&address);
                view! {
                    <article class="address-card" class:address-card--default=is_default>
                        <strong>{address.title.clone()}</strong>
                        <Show when=move || is_default>
                            <span class="address-card__badge">"Default"</span>
                        </Show>
                        <p>{address.one_line()}</p>
                        <button on:click=move |_| {
                            input.set(editable.clone());
                            error.set(None);
                            editor.set(Editor::Editing(id));
                        }>"Edit"</button>
                    </article>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="account">
            <AccountSidebar/>
            <div class="account__content">
                <h1>"My addresses"</h1>
                <Show when=move || error.get().is_some()>
                    <p class="account__notice account__notice--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="account__add" on:click=move |_| open_add()>"Add address"</button>
                {form}
                <div class="address-list">{list}</div>
            </div>
        </div>
    }
}
