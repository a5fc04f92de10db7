//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `modal`, `cart`, etc.) so pages can
//! depend on small focused models. Only `session` talks to the network; the
//! rest are plain data with pure transitions.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod modal;
pub mod news;
pub mod orders;
pub mod session;
