//! Login, refresh and revocation protocols.

pub mod manager;

pub use manager::{LoginInput, LoginResult, RefreshResult, SessionManager};
