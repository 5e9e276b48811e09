//! Infrastructure layer for external collaborators.
//!
//! This layer implements interfaces defined by the domain layer. Gates only
//! see the traits, so any of these can be swapped for a networked store.
//!
//! # Modules
//!
//! - [`inventory`] - Cached inventory over a JSON file source
//! - [`sessions`] - In-memory session store and admin registry

pub mod inventory;
pub mod sessions;
