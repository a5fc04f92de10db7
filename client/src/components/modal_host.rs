//! Top-level switch rendering whichever auth modal is active.

use leptos::prelude::*;

use crate::components::login_modal::LoginModal;
use crate::components::register_modal::RegisterModal;
use crate::state::modal::{ActiveModal, ModalState};

#[component]
pub fn ModalHost() -> impl IntoView {
    let modal = expect_context::<RwSignal<ModalState>>();
    let active = Memo::new(move |_| modal.with(|m| m.active));

    move || match active.get() {
        ActiveModal::None => ().into_any(),
        ActiveModal::Login => view! { <LoginModal/> }.into_any(),
        ActiveModal::Register => view! { <RegisterModal/> }.into_any(),
    }
}
