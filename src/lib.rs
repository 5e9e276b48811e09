//! # Gatehouse
//!
//! Request gating for an Axum HTTP service: composable middleware that
//! decides whether a request may reach its handler at all.
//!
//! ## Gates
//!
//! - **Session** - 401 unless the caller has an active session
//! - **Admin** - 401 when the check fails, 403 for non-admins
//! - **Logging** - one access line per request, full dump at trace level
//! - **Body closure** - the request body is released after the handler returns
//! - **Inventory** - shared reference data is loaded before the handler runs
//!
//! Gates talk to their collaborators through traits in [`domain`]; in-process
//! implementations live in [`infrastructure`]. Route composition and gate
//! ordering are defined in [`routes`].
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Request context and collaborator traits
//! - **Infrastructure Layer** ([`infrastructure`]) - Session store and inventory cache
//! - **API Layer** ([`api`]) - Gates, handlers and DTOs
//!
//! ## Quick Start
//!
//! ```bash
//! export SESSIONS_FILE="sessions.json"
//! export INVENTORY_FILE="inventory.json"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::domain::{
        AdminCheck, Inventory, InventoryError, InventoryRecord, RequestContext, SessionError,
        SessionResolver,
    };
    pub use crate::error::{AppError, ErrorReply, ErrorStatus};
    pub use crate::infrastructure::inventory::{CachedInventory, JsonFileSource};
    pub use crate::infrastructure::sessions::InMemorySessionStore;
    pub use crate::routes::{app_router, build_router};
    pub use crate::state::AppState;
}
