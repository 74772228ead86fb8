//! PostgreSQL implementations of the store capabilities.
//!
//! The `users` and `sessions` tables are owned by the schema migrations of
//! the CRUD layer; these repositories only read users and read/create/block
//! sessions.

pub mod session;
pub mod user;

pub use session::PgSessionRepository;
pub use user::PgUserRepository;
