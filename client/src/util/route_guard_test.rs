use super::*;
use crate::net::types::CustomerProfile;

fn checkout() -> RouteLocation {
    RouteLocation::new("/checkout", "?step=2", "")
}

#[test]
fn loading_session_is_pending() {
    let session = Session::restore(Some("abc".to_owned()));
    assert_eq!(evaluate(&session), GuardDecision::Pending);
    assert_eq!(gate_command(&session, &checkout()), None);
}

#[test]
fn logged_out_session_is_denied_with_login_request() {
    let session = Session::restore(None);
    assert_eq!(evaluate(&session), GuardDecision::Deny);
    assert_eq!(
        gate_command(&session, &checkout()),
        Some(ModalCommand::Open { modal: ActiveModal::Login, redirect_from: Some(checkout()) })
    );
}

#[test]
fn authenticated_session_is_allowed() {
    let mut session = Session::default();
    let ticket = session.authenticate("abc".to_owned());
    session.complete_profile_fetch(&ticket, Ok(CustomerProfile::default()));
    assert_eq!(evaluate(&session), GuardDecision::Allow);
    assert_eq!(gate_command(&session, &checkout()), None);
}

#[test]
fn denied_visit_records_full_location_as_redirect() {
    let mut modal = ModalState::default();
    let command = gate_command(&Session::default(), &checkout()).unwrap();
    modal.dispatch(command);
    assert!(modal.is_open(ActiveModal::Login));
    assert_eq!(modal.pending_redirect(), Some("/checkout?step=2"));
}
