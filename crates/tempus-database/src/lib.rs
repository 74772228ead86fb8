//! # tempus-database
//!
//! The persistence collaborator of the authentication core. Defines the
//! narrow capability traits the core consumes ([`UserLookup`],
//! [`SessionRepository`]) and provides PostgreSQL and in-memory
//! implementations of them.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use memory::{MemorySessionStore, MemoryUserStore};
pub use repositories::{PgSessionRepository, PgUserRepository};
pub use traits::{SessionRepository, UserLookup};
