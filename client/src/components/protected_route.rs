//! Wrapper that renders its children only for a logged-in customer.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::modal::{ModalState, RouteLocation};
use crate::state::session::AppSession;
use crate::util::route_guard::{GuardDecision, evaluate, install_login_gate};

/// Guard for account and checkout routes.
///
/// The placeholder covers both the loading and the denied case, so the
/// server render and the first client render agree.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<AppSession>();
    let modal = expect_context::<RwSignal<ModalState>>();
    let state = session.state();
    let location = use_location();
    let navigate = use_navigate();

    install_login_gate(
        state,
        modal,
        move || RouteLocation::new(location.pathname.get(), location.search.get(), location.hash.get()),
        move |path, options| navigate(path, options),
    );

    let allowed = move || state.with(|s| evaluate(s) == GuardDecision::Allow);

    view! {
        <Show
            when=allowed
            fallback=|| view! { <div class="route-guard__placeholder">"Loading application state..."</div> }
        >
            {children()}
        </Show>
    }
}
