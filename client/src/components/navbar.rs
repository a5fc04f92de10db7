//! Site header with navigation and auth controls.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::modal::{ActiveModal, ModalCommand, ModalState, RouteLocation};
use crate::state::session::AppSession;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let modal = expect_context::<RwSignal<ModalState>>();
    let state = session.state();
    let location = use_location();
    let navigate = use_navigate();

    let request = move |kind: ActiveModal| {
        let here = RouteLocation::new(
            location.pathname.get_untracked(),
            location.search.get_untracked(),
            location.hash.get_untracked(),
        );
        modal.update(|m| m.dispatch(ModalCommand::Open { modal: kind, redirect_from: Some(here) }));
    };
    let request_login = request.clone();
    let request_register = request;

    let on_logout = Callback::new(move |()| {
        session.logout();
        navigate("/", NavigateOptions::default());
    });

    let logged_in = move || state.with(|s| s.is_logged_in());
    let display_name = move || {
        state.with(|s| s.user.as_ref().map_or_else(|| "My Account".to_owned(), |u| u.display_name()))
    };

    view! {
        <header class="navbar">
            <a class="navbar__brand" href="/">"Pumacon Store"</a>
            <nav class="navbar__links">
                <a href="/">"Home"</a>
                <a href="/products">"Products"</a>
                <a href="/news">"News"</a>
                <a href="/cart">"Cart"</a>
            </nav>
            <div class="navbar__auth">
                <Show
                    when=logged_in
                    fallback=move || {
                        let request_login = request_login.clone();
                        let request_register = request_register.clone();
                        view! {
                            <button class="navbar__button" on:click=move |_| request_login(ActiveModal::Login)>
                                "Login"
                            </button>
                            <button class="navbar__button navbar__button--primary" on:click=move |_| request_register(ActiveModal::Register)>
                                "Register"
                            </button>
                        }
                    }
                >
                    <a class="navbar__account" href="/account/profile">{display_name}</a>
                    <button class="navbar__button" on:click=move |_| on_logout.run(())>"Logout"</button>
                </Show>
            </div>
        </header>
    }
}
