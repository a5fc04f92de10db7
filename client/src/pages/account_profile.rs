//! Account profile: personal details editor and password change.

use leptos::prelude::*;

use crate::components::account_sidebar::AccountSidebar;
use crate::state::session::AppSession;
use crate::util::format::format_date;
use crate::util::validation::{validate_password_change, validate_profile_update};

const PROFILE_SAVED: &str = "Profile updated.";
const PROFILE_FAILED: &str = "Failed to update profile.";
const PASSWORD_SAVED: &str = "Password changed.";
const PASSWORD_FAILED: &str = "Failed to change password.";

#[derive(Clone, Debug, Default, PartialEq)]
struct ProfileDraft {
    first_name: String,
    last_name: String,
    phone: String,
    birthday: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct PasswordDraft {
    current: String,
    new_password: String,
    confirm: String,
}

/// Ok is a success notice, Err an error notice.
type Notice = Option<Result<String, String>>;

fn notice_view(notice: Notice) -> impl IntoView {
    notice.map(|n| match n {
        Ok(msg) => view! { <p class="account__notice">{msg}</p> }.into_any(),
        Err(msg) => view! { <p class="account__notice account__notice--error">{msg}</p> }.into_any(),
    })
}

#[component]
pub fn AccountProfilePage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();

    let draft = RwSignal::new(ProfileDraft::default());
    let password = RwSignal::new(PasswordDraft::default());
    let profile_notice = RwSignal::new(None::<Result<String, String>>);
    let password_notice = RwSignal::new(None::<Result<String, String>>);
    let busy = RwSignal::new(false);

    // Seed the editor from the session user whenever it changes.
    Effect::new(move || {
        let seeded = state.with(|s| {
            s.user.as_ref().map(|u| {
                let detail = u.detail.clone().unwrap_or_default();
                ProfileDraft {
                    first_name: detail.first_name,
                    last_name: detail.last_name,
                    phone: u.phone.clone().unwrap_or_default(),
                    birthday: detail.birthday.as_deref().map(|b| format_date(Some(b))).unwrap_or_default(),
                }
            })
        });
        if let Some(seeded) = seeded {
            draft.set(seeded);
        }
    });

    let save_session = session.clone();
    let on_save_profile = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        profile_notice.set(None);
        let request = match draft
            .with_untracked(|d| validate_profile_update(&d.first_name, &d.last_name, &d.phone, &d.birthday))
        {
            Ok(request) => request,
            Err(msg) => {
                profile_notice.set(Some(Err(msg.to_owned())));
                return;
            }
        };
        let Some(token) = save_session.token() else { return };
        busy.set(true);
        let session = save_session.clone();
        leptos::task::spawn_local(async move {
            match session.api().update_profile(&token, &request).await {
                Ok(resp) => {
                    match resp.customer {
                        Some(profile) => session.replace_user(profile),
                        None => {
                            session.refresh_profile().await;
                        }
                    }
                    profile_notice.set(Some(Ok(resp.message.unwrap_or_else(|| PROFILE_SAVED.to_owned()))));
                }
                Err(e) => {
                    if let Some(msg) = session.error_message(&e, PROFILE_FAILED) {
                        profile_notice.set(Some(Err(msg)));
                    }
                }
            }
            busy.set(false);
        });
    };

    let on_change_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        password_notice.set(None);
        let request = match password.with_untracked(|p| validate_password_change(&p.current, &p.new_password, &p.confirm)) {
            Ok(request) => request,
            Err(msg) => {
                password_notice.set(Some(Err(msg.to_owned())));
                return;
            }
        };
        let Some(token) = session.token() else { return };
        busy.set(true);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.api().change_password(&token, &request).await {
                Ok(resp) => {
                    password.set(PasswordDraft::default());
                    password_notice.set(Some(Ok(resp.message.unwrap_or_else(|| PASSWORD_SAVED.to_owned()))));
                }
                Err(e) => {
                    if let Some(msg) = session.error_message(&e, PASSWORD_FAILED) {
                        password_notice.set(Some(Err(msg)));
                    }
                }
            }
            busy.set(false);
        });
    };

    let email = move || state.with(|s| s.user.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let joined = move || {
        state.with(|s| format_date(s.user.as_ref().and_then(|u| u.detail.as_ref()).and_then(|d| d.join_date.as_deref())))
    };

    view! {
        <div class="account">
            <AccountSidebar/>
            <div class="account__content">
                <h1>"My profile"</h1>
                <p class="account__meta">{email} " · member since " {joined}</p>

                <form class="account__form" on:submit=on_save_profile>
                    <h2>"Personal details"</h2>
                    {move || notice_view(profile_notice.get())}
                    <input
                        placeholder="First name"
                        prop:value=move || draft.with(|d| d.first_name.clone())
                        on:input=move |ev| draft.update(|d| d.first_name = event_target_value(&ev))
                    />
                    <input
                        placeholder="Last name"
                        prop:value=move || draft.with(|d| d.last_name.clone())
                        on:input=move |ev| draft.update(|d| d.last_name = event_target_value(&ev))
                    />
                    <input
                        type="tel"
                        placeholder="Phone number"
                        prop:value=move || draft.with(|d| d.phone.clone())
                        on:input=move |ev| draft.update(|d| d.phone = event_target_value(&ev))
                    />
                    <input
                        type="date"
                        prop:value=move || draft.with(|d| d.birthday.clone())
                        on:input=move |ev| draft.update(|d| d.birthday = event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || busy.get()>"Save changes"</button>
                </form>

                <form class="account__form" on:submit=on_change_password>
                    <h2>"Change password"</h2>
                    {move || notice_view(password_notice.get())}
                    <input
                        type="password"
                        placeholder="Current password"
                        prop:value=move || password.with(|p| p.current.clone())
                        on:input=move |ev| password.update(|p| p.current = event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="New password"
                        prop:value=move || password.with(|p| p.new_password.clone())
                        on:input=move |ev| password.update(|p| p.new_password = event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Confirm new password"
                        prop:value=move || password.with(|p| p.confirm.clone())
                        on:input=move |ev| password.update(|p| p.confirm = event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || busy.get()>"Change password"</button>
                </form>
            </div>
        </div>
    }
}
