//! Side navigation shared by the account pages.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::session::AppSession;

const LINKS: [(&str, &str); 3] =
    [("/account/profile", "Profile"), ("/account/orders", "Orders"), ("/account/address", "Addresses")];

#[component]
pub fn AccountSidebar() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let location = use_location();
    let navigate = use_navigate();

    let on_logout = Callback::new(move |()| {
        session.logout();
        navigate("/", NavigateOptions::default());
    });

    let greeting = move || state.with(|s| s.user.as_ref().map(|u| format!("Hi, {}", u.display_name())));

    view! {
        <aside class="account-sidebar">
            <p class="account-sidebar__greeting">{greeting}</p>
            <nav class="account-sidebar__nav">
                {LINKS
                    .into_iter()
                    .map(|(href, label)| {
                        let active = move || location.pathname.with(|p| p == href);
                        view! {
                            <a
                                class="account-sidebar__link"
                                class:account-sidebar__link--active=active
                                href=href
                            >
                                {label}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
            <button class="account-sidebar__logout" on:click=move |_| on_logout.run(())>
                "Logout"
            </button>
        </aside>
    }
}
