//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its route-scoped fetches and local form state and reaches
//! the session through the `AppSession` context. Account and checkout pages
//! are mounted behind `ProtectedRoute`.

pub mod account_address;
pub mod account_orders;
pub mod account_profile;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod news;
pub mod news_detail;
pub mod not_found;
pub mod product_detail;
pub mod products;
