//! Login modal: credentials form plus post-login navigation.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::modal::{ActiveModal, ModalState, resolve_post_login};
use crate::state::session::AppSession;
use crate::util::validation::validate_login;

/// Modal shown while `ActiveModal::Login` is active.
///
/// On success the session store closes the modal; this component then
/// resolves where to go, consuming any pending redirect exactly once.
#[component]
pub fn LoginModal() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let modal = expect_context::<RwSignal<ModalState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let close = Callback::new(move |()| modal.update(ModalState::close));
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close.run(());
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        let credentials = match validate_login(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        busy.set(true);

        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match session.login(&credentials).await {
                Ok(()) => {
                    let has_address = session.state().with_untracked(|s| s.has_address());
                    if let Some(next) = modal.try_update(|m| resolve_post_login(has_address, m)) {
                        navigate(&next.path, NavigateOptions { replace: next.replace, ..NavigateOptions::default() });
                    }
                    password.set(String::new());
                }
                Err(msg) => error.set(Some(msg)),
            }
            busy.set(false);
        });
    };

    let to_register = move |_| modal.update(|m| m.switch(ActiveModal::Register));

    view! {
        <div class="auth-modal__backdrop" on:click=move |_| close.run(())>
            <div
                class="auth-modal"
                role="dialog"
                aria-modal="true"
                tabindex="0"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
            >
                <button class="auth-modal__close" on:click=move |_| close.run(()) aria-label="Close">
                    "✕"
                </button>
                <h4>"Welcome back"</h4>
                <p>"If you have an account with us, please log in."</p>
                <Show when=move || error.get().is_some()>
                    <div class="auth-modal__alert auth-modal__alert--error">{move || error.get().unwrap_or_default()}</div>
                </Show>
                <form class="auth-modal__form" on:submit=on_submit>
                    <input
                        class="auth-modal__input"
                        type="email"
                        name="email"
                        placeholder="Enter email address"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <div class="auth-modal__password">
                        <input
                            class="auth-modal__input"
                            type=move || if show_password.get() { "text" } else { "password" }
                            name="password"
                            placeholder="Enter password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || busy.get()
                        />
                        <button
                            type="button"
                            class="auth-modal__reveal"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Hide" } else { "Show" }}
                        </button>
                    </div>
                    <button class="auth-modal__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-modal__switch">
                    "Don't have an account? "
                    <button type="button" class="auth-modal__link" on:click=to_register>
                        "Register"
                    </button>
                </p>
            </div>
        </div>
    }
}
