//! # tempus-api
//!
//! HTTP API layer for Tempus built on Axum.
//!
//! Exposes login, token refresh, session revocation and user lookup, and
//! maps [`AppError`](tempus_core::AppError) kinds to HTTP status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
