//! # client
//!
//! Leptos storefront UI: catalog, cart, checkout, account pages, and the
//! customer session with its login/register modals.
//!
//! Compiles natively for server rendering and unit tests, and to WASM with the
//! `hydrate` feature, where `hydrate()` is the browser entry point.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
