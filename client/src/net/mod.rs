//! Networking modules for the storefront REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues HTTP calls, `error` classifies failures, and `types` defines
//! the wire schema.

pub mod api;
pub mod error;
pub mod types;
