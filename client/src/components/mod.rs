//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome, the auth modals, and the route guard while
//! reading and writing the session and modal state from Leptos context.

pub mod account_sidebar;
pub mod login_modal;
pub mod modal_host;
pub mod navbar;
pub mod product_card;
pub mod protected_route;
pub mod register_modal;
