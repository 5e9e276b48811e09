//! HTTP request handlers for API endpoints.
//!
//! Handlers assume the gates configured in [`crate::api::routes`] already ran.

pub mod inventory;
pub mod user;
pub mod version;

pub use inventory::{inventory_handler, refresh_inventory_handler};
pub use user::me_handler;
pub use version::version_handler;
