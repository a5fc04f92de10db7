use super::*;

fn checkout() -> RouteLocation {
    RouteLocation::new("/checkout", "", "")
}

// =============================================================
// RouteLocation
// =============================================================

#[test]
fn full_path_joins_search_and_hash() {
    let loc = RouteLocation::new("/products", "?category=3", "#top");
    assert_eq!(loc.full_path(), "/products?category=3#top");
}

#[test]
fn full_path_adds_missing_markers() {
    let loc = RouteLocation::new("/products", "page=2", "reviews");
    assert_eq!(loc.full_path(), "/products?page=2#reviews");
}

#[test]
fn full_path_skips_empty_parts() {
    let loc = RouteLocation::new("/cart", "?", "");
    assert_eq!(loc.full_path(), "/cart");
}

// =============================================================
// Open / switch / close
// =============================================================

#[test]
fn default_has_no_modal_and_no_redirect() {
    let state = ModalState::default();
    assert_eq!(state.active, ActiveModal::None);
    assert_eq!(state.pending_redirect(), None);
}

#[test]
fn open_with_location_records_redirect() {
    let mut state = ModalState::default();
    state.open(ActiveModal::Login, Some(&checkout()));
    assert!(state.is_open(ActiveModal::Login));
    assert_eq!(state.pending_redirect(), Some("/checkout"));
}

#[test]
fn open_without_location_clears_redirect() {
    let mut state = ModalState::default();
    state.open(ActiveModal::Login, Some(&checkout()));
    state.open(ActiveModal::Register, None);
    assert!(state.is_open(ActiveModal::Register));
    assert_eq!(state.pending_redirect(), None);
}

#[test]
fn open_with_empty_pathname_clears_redirect() {
    let mut state = ModalState::default();
    state.open(ActiveModal::Login, Some(&checkout()));
    state.open(ActiveModal::Login, Some(&RouteLocation::default()));
    assert_eq!(state.pending_redirect(), None);
}

#[test]
fn close_keeps_redirect() {
    let mut state = ModalState::default();
    state.open(ActiveModal::Login, Some(&checkout()));
    state.close();
    assert_eq!(state.active, ActiveModal::None);
    assert_eq!(state.pending_redirect(), Some("/checkout"));
}

#[test]
fn switching_login_register_login_preserves_redirect() {
    let mut state = ModalState::default();
    state.dispatch(ModalCommand::Open { modal: ActiveModal::Login, redirect_from: Some(checkout()) });
    state.dispatch(ModalCommand::Switch(ActiveModal::Register));
    assert!(state.is_open(ActiveModal::Register));
    state.dispatch(ModalCommand::Switch(ActiveModal::Login));
    assert!(state.is_open(ActiveModal::Login));

    let next = resolve_post_login(Some(true), &mut state);
    assert_eq!(next, PostLogin { path: "/checkout".to_owned(), replace: true });
}

#[test]
fn take_redirect_hands_out_value_once() {
    let mut state = ModalState::default();
    state.open(ActiveModal::Login, Some(&checkout()));
    assert_eq!(state.take_redirect().as_deref(), Some("/checkout"));
    assert_eq!(state.take_redirect(), None);
}

// =============================================================
// Post-login destination
// =============================================================

#[test]
fn post_login_redirect_is_followed_exactly_once() {
    let mut state = ModalState::default();
    state.open(ActiveModal::Login, Some(&checkout()));
    state.close();

    let first = resolve_post_login(None, &mut state);
    assert_eq!(first.path, "/checkout");
    assert!(first.replace);
    assert_eq!(state.pending_redirect(), None);

    let second = resolve_post_login(None, &mut state);
    assert_eq!(second, PostLogin { path: "/".to_owned(), replace: false });
}

#[test]
fn post_login_without_address_goes_to_address_setup() {
    let mut state = ModalState::default();
    state.open(ActiveModal::Login, Some(&checkout()));

    let next = resolve_post_login(Some(false), &mut state);
    assert_eq!(next.path, ADDRESS_SETUP_PATH);
    assert!(!next.replace);
    assert_eq!(state.pending_redirect(), None);
}

#[test]
fn post_login_defaults_to_home() {
    let mut state = ModalState::default();
    let next = resolve_post_login(Some(true), &mut state);
    assert_eq!(next.path, "/");
}
