//! Domain types and collaborator interfaces.
//!
//! Gates depend only on the traits defined here. Concrete implementations
//! live in [`crate::infrastructure`]; mocks are generated with `mockall`
//! under `cfg(test)`.
//!
//! - [`RequestContext`] - request head as seen by gates
//! - [`SessionResolver`] / [`AdminCheck`] - session identity and privilege
//! - [`Inventory`] / [`InventorySource`] - preloaded reference data

pub mod inventory;
pub mod request_context;
pub mod session;

pub use inventory::{Inventory, InventoryError, InventoryRecord, InventorySnapshot, InventorySource};
pub use request_context::RequestContext;
pub use session::{AdminCheck, SessionError, SessionResolver};

#[cfg(test)]
pub use inventory::{MockInventory, MockInventorySource};
#[cfg(test)]
pub use session::{MockAdminCheck, MockSessionResolver};
