//! Scoped, hierarchical authorization decisions.
//!
//! Every `enforce_*` operation resolves the acting user from the request
//! identity and fails closed: any lookup failure is a denial.

use std::sync::Arc;

use tracing::{debug, warn};

use tempus_core::error::AppError;
use tempus_database::traits::UserLookup;
use tempus_entity::{AccessRole, User};

use crate::context::RequestContext;

/// Returns `true` for super users and admins.
pub fn is_admin(user: &User) -> bool {
    user.role.satisfies(AccessRole::Admin)
}

/// Returns `true` when `user` administers `target_company_id`.
///
/// Admins administer every company. A company admin matches only an equal,
/// present company id; two absent ids are not a match.
pub fn is_company_admin(user: &User, target_company_id: Option<i64>) -> bool {
    if is_admin(user) {
        return true;
    }
    if !user.role.satisfies(AccessRole::CompanyAdmin) {
        return false;
    }
    matches!((user.company_id, target_company_id), (Some(own), Some(target)) if own == target)
}

/// Turns a denied decision into a `Forbidden` error.
pub fn require(decision: bool, what: &str) -> Result<(), AppError> {
    if decision {
        Ok(())
    } else {
        Err(AppError::forbidden(format!("Access denied: {what}")))
    }
}

/// Authorization decisions against stored user records.
#[derive(Clone)]
pub struct RbacEnforcer {
    users: Arc<dyn UserLookup>,
}

impl std::fmt::Debug for RbacEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RbacEnforcer").finish_non_exhaustive()
    }
}

impl RbacEnforcer {
    /// Creates an enforcer over the given user lookup.
    pub fn new(users: Arc<dyn UserLookup>) -> Self {
        Self { users }
    }

    /// Looks up the stored user behind the request identity.
    pub async fn resolve_actor(&self, ctx: &RequestContext) -> Result<User, AppError> {
        let subject = ctx
            .subject()
            .map_err(|e| AppError::actor_not_found(e.message))?;

        self.users
            .get_user_by_username(subject)
            .await
            .map_err(|e| {
                AppError::actor_not_found(format!(
                    "cannot resolve actor '{subject}': {}",
                    e.message
                ))
            })
    }

    /// Allows the actor when its role is at least as privileged as `required`.
    pub async fn enforce_role(&self, ctx: &RequestContext, required: AccessRole) -> bool {
        let Some(actor) = self.actor_or_deny(ctx).await else {
            return false;
        };

        let allowed = actor.role.satisfies(required);
        if !allowed {
            debug!(actor = %actor.username, role = %actor.role, required = %required, "Role check denied");
        }
        allowed
    }

    /// Allows self-access, or access by an admin of the target's company.
    pub async fn enforce_user(&self, ctx: &RequestContext, target_user_id: i64) -> bool {
        let Some(actor) = self.actor_or_deny(ctx).await else {
            return false;
        };

        if actor.id == target_user_id {
            return true;
        }

        let target = match self.users.get_user(target_user_id).await {
            Ok(target) => target,
            Err(e) => {
                warn!(actor = %actor.username, target_user_id, error = %e, "Target user lookup failed; denying");
                return false;
            }
        };

        let allowed = is_company_admin(&actor, target.company_id);
        if !allowed {
            debug!(actor = %actor.username, target_user_id, "User check denied");
        }
        allowed
    }

    /// Allows admins of `target_company_id`.
    pub async fn enforce_company(&self, ctx: &RequestContext, target_company_id: i64) -> bool {
        let Some(actor) = self.actor_or_deny(ctx).await else {
            return false;
        };

        let allowed = is_company_admin(&actor, Some(target_company_id));
        if !allowed {
            debug!(actor = %actor.username, target_company_id, "Company check denied");
        }
        allowed
    }

    async fn actor_or_deny(&self, ctx: &RequestContext) -> Option<User> {
        match self.resolve_actor(ctx).await {
            Ok(actor) => Some(actor),
            Err(e) => {
                warn!(error = %e, "Actor resolution failed; denying");
                None
            }
        }
    }
}
