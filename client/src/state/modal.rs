//! Authentication modal orchestration.
//!
//! SYSTEM CONTEXT
//! ==============
//! A single `ModalState` decides which auth modal is visible. Navbar buttons,
//! the route guard, and pages dispatch `ModalCommand`s to it instead of
//! toggling modals directly, and the login flow consumes the pending redirect
//! it recorded.
//!
//! DESIGN
//! ======
//! `close` and `switch` leave the pending redirect alone so a detour through
//! the register modal still lands the customer on the page they asked for.
//! Only `open` with no origin resets it.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

/// Landing page for customers who finish login without a saved address.
pub const ADDRESS_SETUP_PATH: &str = "/account/address?add=1";

/// Which authentication modal is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveModal {
    #[default]
    None,
    Login,
    Register,
}

/// The parts of a router location needed to rebuild a redirect target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteLocation {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl RouteLocation {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>, hash: impl Into<String>) -> Self {
        Self { pathname: pathname.into(), search: search.into(), hash: hash.into() }
    }

    /// `pathname + ?search + #hash`, tolerating search/hash with or without
    /// their leading marker.
    pub fn full_path(&self) -> String {
        let mut out = self.pathname.clone();
        let search = self.search.trim_start_matches('?');
        if !search.is_empty() {
            out.push('?');
            out.push_str(search);
        }
        let hash = self.hash.trim_start_matches('#');
        if !hash.is_empty() {
            out.push('#');
            out.push_str(hash);
        }
        out
    }
}

/// Requests other components send to the modal orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalCommand {
    /// Show `modal`; remember `redirect_from` as the post-login target, or
    /// forget any previous target when absent.
    Open { modal: ActiveModal, redirect_from: Option<RouteLocation> },
    /// Show `modal` keeping the current redirect target.
    Switch(ActiveModal),
    Close,
}

/// Visible modal plus the path to return to after login.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    pub active: ActiveModal,
    pending_redirect: Option<String>,
}

impl ModalState {
    pub fn open(&mut self, modal: ActiveModal, from: Option<&RouteLocation>) {
        self.active = modal;
        self.pending_redirect = from.filter(|loc| !loc.pathname.is_empty()).map(RouteLocation::full_path);
    }

    pub fn switch(&mut self, modal: ActiveModal) {
        self.active = modal;
    }

    pub fn close(&mut self) {
        self.active = ActiveModal::None;
    }

    pub fn dispatch(&mut self, command: ModalCommand) {
        match command {
            ModalCommand::Open { modal, redirect_from } => self.open(modal, redirect_from.as_ref()),
            ModalCommand::Switch(modal) => self.switch(modal),
            ModalCommand::Close => self.close(),
        }
    }

    pub fn is_open(&self, modal: ActiveModal) -> bool {
        self.active == modal
    }

    pub fn pending_redirect(&self) -> Option<&str> {
        self.pending_redirect.as_deref()
    }

    /// Hand out the pending redirect once; later calls return `None`.
    pub fn take_redirect(&mut self) -> Option<String> {
        self.pending_redirect.take()
    }
}

/// Where to send the customer after a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostLogin {
    pub path: String,
    /// Replace the history entry instead of pushing a new one.
    pub replace: bool,
}

/// Resolve the post-login destination and consume the pending redirect.
///
/// Customers known to have no address go to address setup first; otherwise
/// the recorded redirect wins, falling back to home.
pub fn resolve_post_login(has_address: Option<bool>, modal: &mut ModalState) -> PostLogin {
    let redirect = modal.take_redirect();
    if has_address == Some(false) {
        return PostLogin { path: ADDRESS_SETUP_PATH.to_owned(), replace: false };
    }
    match redirect {
        Some(path) => PostLogin { path, replace: true },
        None => PostLogin { path: "/".to_owned(), replace: false },
    }
}
