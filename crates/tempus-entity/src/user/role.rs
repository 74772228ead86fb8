//! Access role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tempus_core::AppError;

/// Roles available in the RBAC system.
///
/// Roles form a total order where a *lower* rank is *more* privileged:
/// SuperUser < Admin < CompanyAdmin < TeamManager < Default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
#[serde(rename_all = "snake_case")]
pub enum AccessRole {
    /// Unrestricted.
    SuperUser = 1,
    /// Global administrator.
    Admin = 2,
    /// Administrator scoped to a single company.
    CompanyAdmin = 3,
    /// Manager scoped to a team.
    TeamManager = 4,
    /// Standard employee.
    Default = 5,
}

impl AccessRole {
    /// Numeric rank as stored in the database.
    pub fn rank(self) -> i32 {
        self as i32
    }

    /// Returns `true` when this role is at least as privileged as `required`.
    pub fn satisfies(self, required: AccessRole) -> bool {
        self.rank() <= required.rank()
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperUser => "super_user",
            Self::Admin => "admin",
            Self::CompanyAdmin => "company_admin",
            Self::TeamManager => "team_manager",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_user" => Ok(Self::SuperUser),
            "admin" => Ok(Self::Admin),
            "company_admin" => Ok(Self::CompanyAdmin),
            "team_manager" => Ok(Self::TeamManager),
            "default" => Ok(Self::Default),
            _ => Err(AppError::validation(format!(
                "Invalid access role: '{s}'. Expected one of: super_user, admin, company_admin, team_manager, default"
            ))),
        }
    }
}

impl TryFrom<i32> for AccessRole {
    type Error = AppError;

    fn try_from(rank: i32) -> Result<Self, Self::Error> {
        match rank {
            1 => Ok(Self::SuperUser),
            2 => Ok(Self::Admin),
            3 => Ok(Self::CompanyAdmin),
            4 => Ok(Self::TeamManager),
            5 => Ok(Self::Default),
            _ => Err(AppError::validation(format!("Invalid access role rank: {rank}"))),
        }
    }
}
