//! Login gate for protected routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page applies the same rule: wait while the session is
//! still loading, then either render or ask for login. The decision is pure
//! (`evaluate` / `gate_command`) so it can be tested without a router; the
//! effect wiring lives in `install_login_gate`.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::modal::{ActiveModal, ModalCommand, ModalState, RouteLocation};
use crate::state::session::Session;

/// Outcome of checking a session against a protected route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Profile still loading; no decision yet.
    Pending,
    Allow,
    Deny,
}

pub fn evaluate(session: &Session) -> GuardDecision {
    if session.is_loading {
        GuardDecision::Pending
    } else if session.is_logged_in() {
        GuardDecision::Allow
    } else {
        GuardDecision::Deny
    }
}

/// The modal request a denied visit to `location` produces.
pub fn gate_command(session: &Session, location: &RouteLocation) -> Option<ModalCommand> {
    (evaluate(session) == GuardDecision::Deny).then(|| ModalCommand::Open {
        modal: ActiveModal::Login,
        redirect_from: Some(location.clone()),
    })
}

/// Open the login modal and move the background to `/` whenever the session
/// settles logged out. Re-evaluated on every session or location change.
pub fn install_login_gate<L, F>(session: RwSignal<Session>, modal: RwSignal<ModalState>, location: L, navigate: F)
where
    L: Fn() -> RouteLocation + 'static,
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        let current = location();
        let Some(command) = session.with(|s| gate_command(s, &current)) else {
            return;
        };
        modal.update(|m| m.dispatch(command));
        navigate("/", NavigateOptions { replace: true, ..NavigateOptions::default() });
    });
}
