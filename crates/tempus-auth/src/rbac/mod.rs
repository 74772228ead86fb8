//! Role-based access control.

pub mod enforcer;

pub use enforcer::{RbacEnforcer, is_admin, is_company_admin, require};
