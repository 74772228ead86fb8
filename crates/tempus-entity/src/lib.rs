//! # tempus-entity
//!
//! Domain entities read and created by the authentication core.

pub mod session;
pub mod user;

pub use session::{CreateSession, Session};
pub use user::{AccessRole, User};
