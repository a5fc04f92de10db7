//! Registration modal.

use leptos::prelude::*;

use crate::state::modal::{ActiveModal, ModalState};
use crate::state::session::AppSession;
use crate::util::validation::{RegistrationForm, validate_registration};

/// Delay before switching to the login modal so the success text is readable.
#[cfg(feature = "hydrate")]
const SWITCH_TO_LOGIN_DELAY_MS: u32 = 2_000;

/// Modal shown while `ActiveModal::Register` is active.
///
/// Validation failures never reach the network. A successful registration
/// shows the server's confirmation and then switches to login, keeping any
/// pending redirect.
#[component]
pub fn RegisterModal() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let modal = expect_context::<RwSignal<ModalState>>();

    let form = RwSignal::new(RegistrationForm::default());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);
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
        success.set(None);
        let request = match form.with_untracked(validate_registration) {
            Ok(request) => request,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        busy.set(true);

        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.register(&request).await {
                Ok(message) => {
                    success.set(Some(message));
                    form.set(RegistrationForm::default());
                    #[cfg(feature = "hydrate")]
                    {
                        gloo_timers::future::TimeoutFuture::new(SWITCH_TO_LOGIN_DELAY_MS).await;
                        modal.update(|m| {
                            if m.is_open(ActiveModal::Register) {
                                m.switch(ActiveModal::Login);
                            }
                        });
                    }
                }
                Err(msg) => error.set(Some(msg)),
            }
            busy.set(false);
        });
    };

    let to_login = move |_| modal.update(|m| m.switch(ActiveModal::Login));

    let field = move |label: &'static str, kind: &'static str, get: fn(&RegistrationForm) -> String, set: fn(&mut RegistrationForm, String)| {
        view! {
            <input
                class="auth-modal__input"
                type=kind
                placeholder=label
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                disabled=move || busy.get()
            />
        }
    };

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
                <h4>"Create an account"</h4>
                <p>"Register to check out faster, save addresses, and track your orders."</p>
                <Show when=move || error.get().is_some()>
                    <div class="auth-modal__alert auth-modal__alert--error">{move || error.get().unwrap_or_default()}</div>
                </Show>
                <Show when=move || success.get().is_some()>
                    <div class="auth-modal__alert auth-modal__alert--success">{move || success.get().unwrap_or_default()}</div>
                </Show>
                <form class="auth-modal__form" on:submit=on_submit>
                    <div class="auth-modal__row">
                        {field("First name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                        {field("Last name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                    </div>
                    {field("Email address", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {field("Phone number", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                    {field("Password (min. 6 characters)", "password", |f| f.password.clone(), |f, v| f.password = v)}
                    <button class="auth-modal__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Registering..." } else { "Register" }}
                    </button>
                </form>
                <p class="auth-modal__switch">
                    "Already have an account? "
                    <button type="button" class="auth-modal__link" on:click=to_login>
                        "Login"
                    </button>
                </p>
            </div>
        </div>
    }
}
