use std::collections::BTreeSet;
use std::str::FromStr;

use glasspane_core::{AccountId, AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Closed set of role names a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    /// Platform operator with no tenant boundary.
    RootAdmin,
    /// Administrator of a single tenant account.
    TenantAdmin,
    /// Regular tenant member.
    User,
}

impl RoleName {
    /// Returns the storage string for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RootAdmin => "root_admin",
            Self::TenantAdmin => "tenant_admin",
            Self::User => "user",
        }
    }
}

impl FromStr for RoleName {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "root_admin" => Ok(Self::RootAdmin),
            "tenant_admin" => Ok(Self::TenantAdmin),
            "user" => Ok(Self::User),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// Effective role resolved once per authorization check.
///
/// Access decisions branch on this closed classification instead of
/// re-testing individual role names at every step. A user holding several
/// roles resolves to the most privileged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRole {
    /// Unrestricted platform operator.
    RootAdmin,
    /// Sees everything enabled for their own tenant.
    TenantAdmin,
    /// Sees only explicitly granted dashboards within their own tenant.
    Member,
}

impl AccessRole {
    /// Classifies a live role-name set into an effective role.
    ///
    /// Returns `None` for an empty set: a user without any active role row
    /// is treated as unauthenticated-equivalent and denied everywhere.
    #[must_use]
    pub fn classify(roles: &BTreeSet<RoleName>) -> Option<Self> {
        if roles.contains(&RoleName::RootAdmin) {
            return Some(Self::RootAdmin);
        }

        if roles.contains(&RoleName::TenantAdmin) {
            return Some(Self::TenantAdmin);
        }

        if roles.contains(&RoleName::User) {
            return Some(Self::Member);
        }

        None
    }
}

/// Validates the role/account pairing rule before a role is assigned.
///
/// `root_admin` requires a user with no account; `tenant_admin` and `user`
/// require a tenant member. Violations raise a caller-visible validation
/// error instead of being silently coerced.
pub fn validate_role_assignment(
    role: RoleName,
    user_account_id: Option<AccountId>,
) -> AppResult<()> {
    match (role, user_account_id) {
        (RoleName::RootAdmin, Some(account_id)) => Err(AppError::Validation(format!(
            "role 'root_admin' cannot be assigned to a user of account '{account_id}'"
        ))),
        (RoleName::TenantAdmin | RoleName::User, None) => Err(AppError::Validation(format!(
            "role '{}' requires the user to belong to an account",
            role.as_str()
        ))),
        _ => Ok(()),
    }
}
