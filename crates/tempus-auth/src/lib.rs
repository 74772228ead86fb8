//! # tempus-auth
//!
//! Authentication and authorization core for Tempus.
//!
//! ## Modules
//!
//! - `token` — stateless issue/verify of time-bounded credentials
//! - `password` — Argon2id password hashing and verification
//! - `bearer` — bearer header extraction and per-request verification
//! - `context` — request-scoped identity threaded to authorization
//! - `session` — login, refresh and revocation protocols
//! - `rbac` — scoped, hierarchical authorization decisions

pub mod bearer;
pub mod context;
pub mod password;
pub mod rbac;
pub mod session;
pub mod token;


pub use bearer::{authenticate, extract_bearer};
pub use context::RequestContext;
pub use password::PasswordHasher;
pub use rbac::RbacEnforcer;
pub use session::SessionManager;
pub use token::{JwtMaker, Payload, SealedTokenMaker, TokenError, TokenMaker, build_token_maker};
