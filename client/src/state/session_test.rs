use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::block_on;

use super::*;
use crate::net::types::{LoginResponse, MessageResponse, parse_profile};
use crate::state::modal::{ActiveModal, RouteLocation, resolve_post_login};

type ProfileResult = Result<CustomerProfile, ApiError>;

enum ProfileReply {
    Ready(ProfileResult),
    Deferred(oneshot::Receiver<ProfileResult>),
}

/// Scripted backend. Every call is appended to the shared event log.
#[derive(Default)]
struct StubApi {
    log: Rc<RefCell<Vec<String>>>,
    logins: RefCell<VecDeque<Result<LoginResponse, ApiError>>>,
    registrations: RefCell<VecDeque<Result<MessageResponse, ApiError>>>,
    profiles: RefCell<VecDeque<ProfileReply>>,
}

impl StubApi {
    fn with_login(self, reply: Result<LoginResponse, ApiError>) -> Self {
        self.logins.borrow_mut().push_back(reply);
        self
    }

    fn with_registration(self, reply: Result<MessageResponse, ApiError>) -> Self {
        self.registrations.borrow_mut().push_back(reply);
        self
    }

    fn with_profile(self, reply: ProfileResult) -> Self {
        self.profiles.borrow_mut().push_back(ProfileReply::Ready(reply));
        self
    }

    fn with_deferred_profile(self) -> (Self, oneshot::Sender<ProfileResult>) {
        let (tx, rx) = oneshot::channel();
        self.profiles.borrow_mut().push_back(ProfileReply::Deferred(rx));
        (self, tx)
    }

    fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl AuthApi for StubApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.log.borrow_mut().push(format!("login:{}", credentials.email));
        self.logins.borrow_mut().pop_front().unwrap_or(Err(ApiError::Unavailable))
    }

    async fn register(&self, input: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.log.borrow_mut().push(format!("register:{}", input.email));
        self.registrations.borrow_mut().pop_front().unwrap_or(Err(ApiError::Unavailable))
    }

    async fn fetch_profile(&self, token: &str) -> Result<CustomerProfile, ApiError> {
        self.log.borrow_mut().push(format!("profile:{token}"));
        let reply = self.profiles.borrow_mut().pop_front();
        match reply {
            Some(ProfileReply::Ready(result)) => result,
            Some(ProfileReply::Deferred(rx)) => rx.await.unwrap_or(Err(ApiError::Unavailable)),
            None => Err(ApiError::Unavailable),
        }
    }
}

/// In-memory token storage sharing the API's event log.
#[derive(Default)]
struct MemoryStorage {
    log: Rc<RefCell<Vec<String>>>,
    token: RefCell<Option<String>>,
}

impl MemoryStorage {
    fn holding(token: &str) -> Self {
        Self { token: RefCell::new(Some(token.to_owned())), ..Self::default() }
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        self.log.borrow_mut().push(format!("save:{token}"));
        *self.token.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        self.log.borrow_mut().push("clear".to_owned());
        *self.token.borrow_mut() = None;
    }
}

/// Restored store plus the reactive owner its signals live in. Bind the
/// owner for the whole test; dropping it disposes the signals.
fn store(api: StubApi, storage: MemoryStorage) -> (Owner, SessionStore<StubApi, MemoryStorage>) {
    let owner = Owner::new();
    owner.set();
    let log = Rc::clone(&api.log);
    let storage = MemoryStorage { log, ..storage };
    let store = SessionStore::new(api, storage, RwSignal::new(ModalState::default()));
    store.restore();
    (owner, store)
}

fn credentials() -> LoginRequest {
    LoginRequest { email: "a@b.com".to_owned(), password: "secret".to_owned() }
}

fn token_response(token: &str) -> LoginResponse {
    LoginResponse { token: token.to_owned(), ..LoginResponse::default() }
}

fn profile(email: &str) -> CustomerProfile {
    CustomerProfile { email: email.to_owned(), ..CustomerProfile::default() }
}

fn registration() -> RegisterRequest {
    RegisterRequest {
        first_name: "Ana".to_owned(),
        last_name: "Putri".to_owned(),
        email: "ana@example.com".to_owned(),
        phone: "0812".to_owned(),
        password: "secret1".to_owned(),
    }
}

// =============================================================
// Session transitions
// =============================================================

#[test]
fn restore_without_token_is_logged_out_and_not_loading() {
    let session = Session::restore(None);
    assert!(!session.is_logged_in());
    assert!(!session.is_loading);
}

#[test]
fn restore_with_token_starts_loading() {
    let session = Session::restore(Some("abc".to_owned()));
    assert_eq!(session.token.as_deref(), Some("abc"));
    assert!(session.is_loading);
    assert_eq!(session.user, None);
}

#[test]
fn restore_ignores_blank_token() {
    let session = Session::restore(Some("  ".to_owned()));
    assert_eq!(session.token, None);
    assert!(!session.is_loading);
}

#[test]
fn new_store_is_pending_until_restored() {
    let owner = Owner::new();
    owner.set();
    let store = SessionStore::new(StubApi::default(), MemoryStorage::holding("abc"), RwSignal::new(ModalState::default()));
    assert_eq!(store.state().get_untracked(), Session::pending());

    assert!(store.restore());
    assert_eq!(store.token().as_deref(), Some("abc"));
    assert!(store.state().get_untracked().is_loading);
}

#[test]
fn start_loads_profile_for_persisted_token() {
    let api = StubApi::default().with_profile(Ok(profile("a@b.com")));
    let (_owner, store) = store(api, MemoryStorage::holding("abc"));
    block_on(store.start());
    let session = store.state().get_untracked();
    assert!(!session.is_loading);
    assert_eq!(session.user.map(|u| u.email).as_deref(), Some("a@b.com"));
}

#[test]
fn start_without_token_settles_logged_out() {
    let (_owner, store) = store(StubApi::default(), MemoryStorage::default());
    block_on(store.start());
    let session = store.state().get_untracked();
    assert!(!session.is_loading);
    assert!(!session.is_logged_in());
    assert!(store.api().calls().is_empty());
}

#[test]
fn begin_profile_fetch_without_token_finishes_loading() {
    let mut session = Session { is_loading: true, ..Session::default() };
    assert_eq!(session.begin_profile_fetch(), None);
    assert!(!session.is_loading);
}

#[test]
fn fetch_completion_after_clear_is_stale() {
    let mut session = Session::restore(Some("abc".to_owned()));
    let ticket = session.begin_profile_fetch().unwrap();
    session.clear();
    assert_eq!(session.complete_profile_fetch(&ticket, Ok(profile("a@b.com"))), FetchOutcome::Stale);
    assert_eq!(session.token, None);
    assert_eq!(session.user, None);
}

#[test]
fn fetch_completion_after_new_login_is_stale() {
    let mut session = Session::default();
    let old = session.authenticate("abc".to_owned());
    session.clear();
    let _new = session.authenticate("abc".to_owned());
    assert_eq!(session.complete_profile_fetch(&old, Ok(profile("old@b.com"))), FetchOutcome::Stale);
    assert!(session.is_loading);
    assert_eq!(session.user, None);
}

#[test]
fn failed_fetch_clears_token_and_user_together() {
    let mut session = Session::default();
    let ticket = session.authenticate("abc".to_owned());
    let outcome = session.complete_profile_fetch(&ticket, Err(ApiError::Unauthorized { message: None }));
    assert_eq!(outcome, FetchOutcome::TornDown);
    assert_eq!(session.token, None);
    assert_eq!(session.user, None);
    assert!(!session.is_loading);
}

#[test]
fn settled_token_waits_for_login_profile() {
    let mut session = Session::restore(None);
    assert_eq!(session.settled_token(), Some(None));
    let ticket = session.authenticate("tok".to_owned());
    assert_eq!(session.settled_token(), None);
    session.complete_profile_fetch(&ticket, Ok(profile("a@b.com")));
    assert_eq!(session.settled_token(), Some(Some("tok".to_owned())));
}

#[test]
fn settled_token_ignores_profile_changes() {
    let mut session = Session::restore(Some("tok".to_owned()));
    let ticket = session.begin_profile_fetch().unwrap();
    session.complete_profile_fetch(&ticket, Ok(profile("a@b.com")));
    let before = session.settled_token();
    session.user = Some(CustomerProfile { has_address: Some(true), ..profile("a@b.com") });
    assert_eq!(session.settled_token(), before);
}

#[test]
fn holds_token_rejects_replaced_or_cleared_token() {
    let mut session = Session::restore(Some("old".to_owned()));
    assert!(session.holds_token("old"));
    session.authenticate("new".to_owned());
    assert!(!session.holds_token("old"));
    assert!(session.holds_token("new"));
    session.clear();
    assert!(!session.holds_token("new"));
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_populates_token_and_profile() {
    let body = serde_json::json!({ "customer": { "email": "a@b.com" } });
    let api = StubApi::default()
        .with_login(Ok(token_response("abc")))
        .with_profile(Ok(parse_profile(body).unwrap()));
    let (_owner, store) = store(api, MemoryStorage::default());

    assert_eq!(block_on(store.login(&credentials())), Ok(()));

    let session = store.state().get_untracked();
    assert_eq!(session.token.as_deref(), Some("abc"));
    assert_eq!(session.user.map(|u| u.email).as_deref(), Some("a@b.com"));
    assert!(!session.is_loading);
}

#[test]
fn login_persists_token_before_fetching_profile() {
    let api = StubApi::default()
        .with_login(Ok(token_response("abc")))
        .with_profile(Ok(profile("a@b.com")));
    let (_owner, store) = store(api, MemoryStorage::default());

    block_on(store.login(&credentials())).unwrap();

    assert_eq!(store.api().calls(), vec!["login:a@b.com", "save:abc", "profile:abc"]);
}

#[test]
fn login_closes_modal_on_success() {
    let api = StubApi::default()
        .with_login(Ok(token_response("abc")))
        .with_profile(Ok(profile("a@b.com")));
    let (_owner, store) = store(api, MemoryStorage::default());
    store.modal().update(|m| m.open(ActiveModal::Login, None));

    block_on(store.login(&credentials())).unwrap();

    assert_eq!(store.modal().get_untracked().active, ActiveModal::None);
}

#[test]
fn login_failure_returns_server_message_and_leaves_state_untouched() {
    let api = StubApi::default().with_login(Err(ApiError::Unauthorized {
        message: Some("Invalid email or password".to_owned()),
    }));
    let (_owner, store) = store(api, MemoryStorage::default());
    store.modal().update(|m| m.open(ActiveModal::Login, None));
    let before = store.state().get_untracked();

    let result = block_on(store.login(&credentials()));

    assert_eq!(result, Err("Invalid email or password".to_owned()));
    assert_eq!(store.state().get_untracked(), before);
    assert_eq!(store.modal().get_untracked().active, ActiveModal::Login);
    assert_eq!(store.api().calls(), vec!["login:a@b.com"]);
}

#[test]
fn login_failure_without_body_uses_fallback() {
    let api = StubApi::default().with_login(Err(ApiError::Network("offline".to_owned())));
    let (_owner, store) = store(api, MemoryStorage::default());
    assert_eq!(block_on(store.login(&credentials())), Err(LOGIN_FAILED.to_owned()));
}

#[test]
fn login_never_reports_error_with_token_set() {
    let api = StubApi::default()
        .with_login(Err(ApiError::Status { status: 500, message: None }))
        .with_login(Ok(token_response("abc")))
        .with_profile(Err(ApiError::Status { status: 500, message: None }))
        .with_login(Ok(token_response("def")))
        .with_profile(Ok(profile("a@b.com")));
    let (_owner, store) = store(api, MemoryStorage::default());

    for _ in 0..3 {
        let result = block_on(store.login(&credentials()));
        let token = store.token();
        match result {
            Ok(()) => assert!(token.is_some()),
            Err(_) => assert_eq!(token, None),
        }
    }
    assert_eq!(store.token().as_deref(), Some("def"));
}

#[test]
fn login_with_failing_profile_tears_down_and_clears_storage() {
    let api = StubApi::default()
        .with_login(Ok(token_response("abc")))
        .with_profile(Err(ApiError::Unauthorized { message: None }));
    let (_owner, store) = store(api, MemoryStorage::default());

    assert!(block_on(store.login(&credentials())).is_err());
    assert_eq!(store.state().get_untracked().token, None);
    assert_eq!(store.storage.load(), None);
}

#[test]
fn login_fills_missing_address_flag_from_login_response() {
    let api = StubApi::default()
        .with_login(Ok(LoginResponse { has_address: Some(false), ..token_response("abc") }))
        .with_profile(Ok(profile("a@b.com")));
    let (_owner, store) = store(api, MemoryStorage::default());

    block_on(store.login(&credentials())).unwrap();

    assert_eq!(store.state().get_untracked().has_address(), Some(false));
}

#[test]
fn redirect_is_followed_once_after_guarded_login() {
    let api = StubApi::default()
        .with_login(Ok(token_response("abc")))
        .with_profile(Ok(CustomerProfile { has_address: Some(true), ..profile("a@b.com") }));
    let (_owner, store) = store(api, MemoryStorage::default());
    let checkout = RouteLocation::new("/checkout", "", "");
    store.modal().update(|m| m.open(ActiveModal::Login, Some(&checkout)));

    block_on(store.login(&credentials())).unwrap();

    let has_address = store.state().get_untracked().has_address();
    let mut navigations = Vec::new();
    for _ in 0..2 {
        if let Some(next) = store.modal().try_update(|m| resolve_post_login(has_address, m)) {
            navigations.push(next.path);
        }
    }
    assert_eq!(navigations, vec!["/checkout".to_owned(), "/".to_owned()]);
    assert_eq!(store.modal().get_untracked().pending_redirect(), None);
}

#[test]
fn logout_during_login_keeps_pending_redirect() {
    let (api, tx) = StubApi::default().with_login(Ok(token_response("abc"))).with_deferred_profile();
    let (_owner, store) = store(api, MemoryStorage::default());
    let checkout = RouteLocation::new("/checkout", "", "");
    store.modal().update(|m| m.open(ActiveModal::Login, Some(&checkout)));

    let creds = credentials();
    let login = store.login(&creds);
    let interleave = async {
        store.logout();
        let _ = tx.send(Ok(profile("a@b.com")));
    };
    let (result, ()) = block_on(async { futures::join!(login, interleave) });

    assert_eq!(result, Err(LOGIN_FAILED.to_owned()));
    assert_eq!(store.token(), None);
    let modal = store.modal().get_untracked();
    assert!(modal.is_open(ActiveModal::Login));
    assert_eq!(modal.pending_redirect(), Some("/checkout"));
}

#[test]
fn store_signals_stay_live_while_owner_is_bound() {
    let (_owner, store) = store(StubApi::default(), MemoryStorage::holding("abc"));
    store.logout();
    assert_eq!(store.state().try_get_untracked().map(|s| s.is_logged_in()), Some(false));
    assert_eq!(store.modal().try_get_untracked().map(|m| m.active), Some(ActiveModal::None));
}

// =============================================================
// Register
// =============================================================

#[test]
fn register_returns_server_message_without_authenticating() {
    let api = StubApi::default().with_registration(Ok(MessageResponse {
        message: Some("Akun berhasil dibuat".to_owned()),
    }));
    let (_owner, store) = store(api, MemoryStorage::default());

    assert_eq!(block_on(store.register(&registration())), Ok("Akun berhasil dibuat".to_owned()));
    assert!(!store.state().get_untracked().is_logged_in());
}

#[test]
fn register_success_without_message_uses_fallback() {
    let api = StubApi::default().with_registration(Ok(MessageResponse::default()));
    let (_owner, store) = store(api, MemoryStorage::default());
    assert_eq!(block_on(store.register(&registration())), Ok(REGISTER_SUCCEEDED.to_owned()));
}

#[test]
fn register_failure_surfaces_server_error() {
    let api = StubApi::default().with_registration(Err(ApiError::Status {
        status: 409,
        message: Some("Email already registered".to_owned()),
    }));
    let (_owner, store) = store(api, MemoryStorage::default());
    assert_eq!(block_on(store.register(&registration())), Err("Email already registered".to_owned()));
}

// =============================================================
// Logout / refresh
// =============================================================

#[test]
fn logout_twice_matches_logout_once() {
    let api = StubApi::default().with_profile(Ok(profile("a@b.com")));
    let (_owner, store) = store(api, MemoryStorage::holding("abc"));
    block_on(store.refresh_profile());

    store.logout();
    let once = store.state().get_untracked();
    store.logout();
    let twice = store.state().get_untracked();

    assert_eq!(once.token, None);
    assert_eq!(once.user, None);
    assert_eq!((twice.token, twice.user, twice.is_loading), (once.token, once.user, once.is_loading));
    assert_eq!(store.storage.load(), None);
}

#[test]
fn refresh_without_token_only_finishes_loading() {
    let (_owner, store) = store(StubApi::default(), MemoryStorage::default());
    assert_eq!(block_on(store.refresh_profile()), None);
    assert!(!store.state().get_untracked().is_loading);
    assert!(store.api().calls().is_empty());
}

#[test]
fn refresh_failure_tears_down_session() {
    let api = StubApi::default().with_profile(Err(ApiError::Unauthorized { message: None }));
    let (_owner, store) = store(api, MemoryStorage::holding("abc"));

    assert_eq!(block_on(store.refresh_profile()), Some(FetchOutcome::TornDown));
    let session = store.state().get_untracked();
    assert_eq!(session.token, None);
    assert!(!session.is_loading);
    assert_eq!(store.storage.load(), None);
}

#[test]
fn logout_during_refresh_discards_late_profile() {
    let (api, tx) = StubApi::default().with_deferred_profile();
    let (_owner, store) = store(api, MemoryStorage::holding("abc"));

    let refresh = store.refresh_profile();
    let interleave = async {
        store.logout();
        let _ = tx.send(Ok(profile("a@b.com")));
    };
    let (outcome, ()) = block_on(async { futures::join!(refresh, interleave) });

    assert_eq!(outcome, Some(FetchOutcome::Stale));
    let session = store.state().get_untracked();
    assert_eq!(session.token, None);
    assert_eq!(session.user, None);
}

#[test]
fn concurrent_refreshes_last_response_wins() {
    let (api, first_tx) = StubApi::default().with_deferred_profile();
    let (api, second_tx) = api.with_deferred_profile();
    let (_owner, store) = store(api, MemoryStorage::holding("abc"));

    let first = store.refresh_profile();
    let second_then_release_first = async {
        let second = store.refresh_profile();
        let _ = second_tx.send(Ok(profile("second@b.com")));
        let outcome = second.await;
        let _ = first_tx.send(Ok(profile("first@b.com")));
        outcome
    };
    let (a, b) = block_on(async { futures::join!(first, second_then_release_first) });

    assert_eq!((a, b), (Some(FetchOutcome::Applied), Some(FetchOutcome::Applied)));
    let user = store.state().get_untracked().user.unwrap();
    assert_eq!(user.email, "first@b.com");
}

// =============================================================
// 401 policy and profile updates
// =============================================================

#[test]
fn unauthorized_api_error_logs_out() {
    let api = StubApi::default().with_profile(Ok(profile("a@b.com")));
    let (_owner, store) = store(api, MemoryStorage::holding("abc"));
    block_on(store.refresh_profile());

    assert!(store.handle_api_error(&ApiError::Unauthorized { message: None }));
    assert!(!store.state().get_untracked().is_logged_in());
}

#[test]
fn other_api_errors_keep_session() {
    let (_owner, store) = store(StubApi::default(), MemoryStorage::holding("abc"));
    assert!(!store.handle_api_error(&ApiError::Status { status: 403, message: None }));
    assert_eq!(store.token().as_deref(), Some("abc"));
}

#[test]
fn error_message_is_silent_for_unauthorized() {
    let (_owner, store) = store(StubApi::default(), MemoryStorage::holding("abc"));
    let msg = store.error_message(&ApiError::Unauthorized { message: Some("expired".to_owned()) }, "Failed.");
    assert_eq!(msg, None);
    assert_eq!(store.token(), None);
}

#[test]
fn error_message_prefers_server_text() {
    let (_owner, store) = store(StubApi::default(), MemoryStorage::holding("abc"));
    let err = ApiError::Status { status: 400, message: Some("Stock not enough".to_owned()) };
    assert_eq!(store.error_message(&err, "Failed."), Some("Stock not enough".to_owned()));
    assert_eq!(store.error_message(&ApiError::Unavailable, "Failed."), Some("Failed.".to_owned()));
}

#[test]
fn replace_user_requires_login() {
    let (_owner, store) = store(StubApi::default(), MemoryStorage::default());
    store.replace_user(profile("a@b.com"));
    assert_eq!(store.state().get_untracked().user, None);
}

#[test]
fn set_has_address_updates_loaded_profile() {
    let api = StubApi::default().with_profile(Ok(profile("a@b.com")));
    let (_owner, store) = store(api, MemoryStorage::holding("abc"));
    block_on(store.refresh_profile());

    store.set_has_address(true);
    assert_eq!(store.state().get_untracked().has_address(), Some(true));
}
