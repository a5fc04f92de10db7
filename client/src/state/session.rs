//! Customer session: bearer token, profile, and the auth operations that
//! change them.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is constructed once in `App`, provided through context, and
//! restored from persisted storage once the app is running in the browser.
//! It is the only writer of the token and profile; pages, guards, and modals
//! read the `Session` signal and call the store's async operations.
//!
//! DESIGN
//! ======
//! Token and profile always change in a single signal update. Every profile
//! fetch carries a `ProfileTicket` (token + generation). `clear` and
//! `authenticate` bump the generation, so a response that arrives after a
//! logout or a newer login is discarded instead of resurrecting the old
//! session. Refreshes within the same generation are not deduplicated; the
//! last one to resolve wins.
//!
//! ERROR HANDLING
//! ==============
//! Login and register failures come back to the caller as display text.
//! Profile fetch failures tear the session down silently. Any 401 reported
//! through `handle_api_error` does the same.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::api::{AuthApi, HttpApi};
use crate::net::error::ApiError;
use crate::net::types::{CustomerProfile, LoginRequest, RegisterRequest};
use crate::state::modal::ModalState;
use crate::util::storage::{BrowserStorage, TokenStorage};

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const REGISTER_SUCCEEDED: &str = "Registration successful! Please log in to continue.";
pub const REGISTER_FAILED: &str = "Registration failed.";

/// Snapshot of the customer session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<CustomerProfile>,
    pub is_loading: bool,
    epoch: u64,
}

/// Identifies the session a profile fetch was issued for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileTicket {
    pub token: String,
    epoch: u64,
}

/// What happened when a profile response came back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Profile stored on the session.
    Applied,
    /// The session moved on while the request was in flight; nothing changed.
    Stale,
    /// The fetch failed and the session was cleared.
    TornDown,
}

impl Session {
    /// Session at startup. A persisted token means a profile fetch is owed,
    /// so the session starts out loading.
    pub fn restore(token: Option<String>) -> Self {
        let token = token.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty());
        Self { is_loading: token.is_some(), token, user: None, epoch: 0 }
    }

    /// Session before storage has been read: nothing known yet.
    pub fn pending() -> Self {
        Self { is_loading: true, ..Self::default() }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// The token once loading has settled, `None` while a restore or login
    /// is still in flight. Profile updates leave it unchanged.
    pub fn settled_token(&self) -> Option<Option<String>> {
        (!self.is_loading).then(|| self.token.clone())
    }

    /// Whether `token` is still the session's token.
    pub fn holds_token(&self, token: &str) -> bool {
        self.token.as_deref() == Some(token)
    }

    /// The profile's `hasAddress` flag, if the server reported one.
    pub fn has_address(&self) -> Option<bool> {
        self.user.as_ref().and_then(|u| u.has_address)
    }

    /// Install a freshly issued token and start loading its profile.
    pub fn authenticate(&mut self, token: String) -> ProfileTicket {
        self.epoch += 1;
        self.token = Some(token.clone());
        self.user = None;
        self.is_loading = true;
        ProfileTicket { token, epoch: self.epoch }
    }

    /// Ticket for re-fetching the current token's profile, or `None` (and
    /// loading finished) when there is no token.
    pub fn begin_profile_fetch(&mut self) -> Option<ProfileTicket> {
        let Some(token) = self.token.clone() else {
            self.is_loading = false;
            return None;
        };
        self.is_loading = true;
        Some(ProfileTicket { token, epoch: self.epoch })
    }

    pub fn complete_profile_fetch(
        &mut self,
        ticket: &ProfileTicket,
        result: Result<CustomerProfile, ApiError>,
    ) -> FetchOutcome {
        if ticket.epoch != self.epoch || self.token.as_deref() != Some(ticket.token.as_str()) {
            return FetchOutcome::Stale;
        }
        match result {
            Ok(profile) => {
                self.user = Some(profile);
                self.is_loading = false;
                FetchOutcome::Applied
            }
            Err(_) => {
                self.clear();
                FetchOutcome::TornDown
            }
        }
    }

    /// Drop token and profile and invalidate in-flight fetches.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.token = None;
        self.user = None;
        self.is_loading = false;
    }
}

/// The session store wired to the real API and `localStorage`.
pub type AppSession = SessionStore<HttpApi, BrowserStorage>;

/// Owner of the session signal and the only code path that mutates it.
pub struct SessionStore<A, S> {
    state: RwSignal<Session>,
    modal: RwSignal<ModalState>,
    api: Arc<A>,
    storage: Arc<S>,
}

impl<A, S> Clone for SessionStore<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            modal: self.modal,
            api: Arc::clone(&self.api),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<A: AuthApi, S: TokenStorage> SessionStore<A, S> {
    /// Build the store in the pending state. Storage is not read until
    /// `restore`, so server render and hydration start from the same session.
    pub fn new(api: A, storage: S, modal: RwSignal<ModalState>) -> Self {
        Self { state: RwSignal::new(Session::pending()), modal, api: Arc::new(api), storage: Arc::new(storage) }
    }

    /// Load the persisted token. Returns `true` when a profile fetch is owed.
    pub fn restore(&self) -> bool {
        let token = self.storage.load();
        self.state
            .try_update(|s| {
                let epoch = s.epoch + 1;
                *s = Session::restore(token);
                s.epoch = epoch;
                s.is_loading
            })
            .unwrap_or(false)
    }

    /// Restore from storage and load the profile for a persisted token.
    pub async fn start(&self) {
        if self.restore() {
            self.refresh_profile().await;
        }
    }

    /// Reactive session signal for views. Read-only by convention.
    pub fn state(&self) -> RwSignal<Session> {
        self.state
    }

    pub fn modal(&self) -> RwSignal<ModalState> {
        self.modal
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current token without subscribing.
    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token.clone())
    }

    /// Exchange credentials for a token, persist it, then load the profile.
    ///
    /// On success the auth modal is closed. On failure the message is the
    /// server's `error` text when present.
    ///
    /// # Errors
    ///
    /// Returns display text when the credentials are rejected, the request
    /// fails, the follow-up profile fetch fails, or a logout lands before the
    /// profile arrives.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), String> {
        let response = match self.api.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                leptos::logging::warn!("[session] login failed: {e}");
                return Err(e.user_message(LOGIN_FAILED));
            }
        };
        let token = response.token.trim().to_owned();
        if token.is_empty() {
            leptos::logging::warn!("[session] login response carried no token");
            return Err(LOGIN_FAILED.to_owned());
        }

        self.storage.save(&token);
        let Some(ticket) = self.state.try_update(|s| s.authenticate(token)) else {
            return Err(LOGIN_FAILED.to_owned());
        };

        match self.run_profile_fetch(ticket).await {
            FetchOutcome::Applied => {
                if let Some(flag) = response.has_address {
                    self.state.update(|s| {
                        if let Some(user) = s.user.as_mut() {
                            user.has_address.get_or_insert(flag);
                        }
                    });
                }
                self.modal.update(ModalState::close);
                Ok(())
            }
            // A newer login owns the session now; logged out means failure,
            // so the modal keeps its pending redirect.
            FetchOutcome::Stale if self.token().is_some() => Ok(()),
            FetchOutcome::Stale | FetchOutcome::TornDown => Err(LOGIN_FAILED.to_owned()),
        }
    }

    /// Create an account. Never authenticates.
    ///
    /// # Errors
    ///
    /// Returns display text when the server rejects the registration or the
    /// request fails.
    pub async fn register(&self, input: &RegisterRequest) -> Result<String, String> {
        match self.api.register(input).await {
            Ok(resp) => Ok(resp
                .message
                .map(|m| m.trim().to_owned())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| REGISTER_SUCCEEDED.to_owned())),
            Err(e) => {
                leptos::logging::warn!("[session] register failed: {e}");
                Err(e.user_message(REGISTER_FAILED))
            }
        }
    }

    /// Forget the token everywhere. Safe to call repeatedly.
    pub fn logout(&self) {
        self.storage.clear();
        self.state.update(Session::clear);
    }

    /// Re-read the profile for the current token. Failures end the session.
    pub async fn refresh_profile(&self) -> Option<FetchOutcome> {
        let ticket = self.state.try_update(Session::begin_profile_fetch).flatten()?;
        Some(self.run_profile_fetch(ticket).await)
    }

    async fn run_profile_fetch(&self, ticket: ProfileTicket) -> FetchOutcome {
        let result = self.api.fetch_profile(&ticket.token).await;
        if let Err(e) = &result {
            leptos::logging::warn!("[session] profile fetch failed, clearing session: {e}");
        }
        let outcome = self
            .state
            .try_update(|s| s.complete_profile_fetch(&ticket, result))
            .unwrap_or(FetchOutcome::Stale);
        if outcome == FetchOutcome::TornDown {
            self.storage.clear();
        }
        outcome
    }

    /// Apply the session-wide 401 policy to an error from any authenticated
    /// call. Returns `true` when the session was torn down.
    pub fn handle_api_error(&self, err: &ApiError) -> bool {
        if !err.is_unauthorized() {
            return false;
        }
        leptos::logging::warn!("[session] authorization rejected, logging out: {err}");
        self.logout();
        true
    }

    /// Display text for a failed authenticated call, or `None` when the
    /// failure was a 401 and the session has just been torn down.
    pub fn error_message(&self, err: &ApiError, fallback: &str) -> Option<String> {
        if self.handle_api_error(err) {
            return None;
        }
        leptos::logging::warn!("[session] request failed: {err}");
        Some(err.user_message(fallback))
    }

    /// Replace the stored profile after a successful profile edit.
    pub fn replace_user(&self, profile: CustomerProfile) {
        self.state.update(|s| {
            if s.is_logged_in() {
                s.user = Some(profile);
            }
        });
    }

    /// Record whether the customer has saved addresses.
    pub fn set_has_address(&self, has_address: bool) {
        self.state.update(|s| {
            if let Some(user) = s.user.as_mut() {
                user.has_address = Some(has_address);
            }
        });
    }
}
