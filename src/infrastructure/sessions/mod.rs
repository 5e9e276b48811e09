//! Session collaborators.
//!
//! - [`InMemorySessionStore`] - cookie-token sessions and admin flags held in memory

mod in_memory;

pub use in_memory::{
    DEFAULT_SESSION_COOKIE, InMemorySessionStore, SessionEntrySeed, SessionSeed, UserSeed,
};
