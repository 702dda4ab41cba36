//! Hierarchical dashboard access resolution.
//!
//! One service owns the three cooperating responsibilities: classifying a
//! caller's effective role, resolving the tenant boundary that constrains
//! every further lookup, and evaluating dashboard reachability per role.
//! Boolean-returning entry points never surface store errors; they log and
//! deny. Mutation entry points raise normal application errors.

use std::sync::Arc;

use glasspane_core::{AccountId, AppError, AppResult, UserId};
use glasspane_domain::{
    AccessRole, Account, DashboardId, Liveness, RoleName, UserRecord, validate_role_assignment,
};

use crate::access_ports::{AccessRepository, GrantRepository};

mod assignment;
mod evaluate;
mod listing;
mod roles;
mod scope;


/// Tenant boundary resolved for a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// Root admin: no boundary constrains lookups.
    Unrestricted,
    /// All lookups are constrained to this live account.
    Account(AccountId),
    /// No usable scope: unknown user, no roles, or a suspended account.
    Denied,
}

/// Application service resolving dashboard access across the tenant
/// hierarchy.
#[derive(Clone)]
pub struct AccessService {
    repository: Arc<dyn AccessRepository>,
    grants: Arc<dyn GrantRepository>,
}

impl AccessService {
    /// Creates an access service from repository implementations.
    #[must_use]
    pub fn new(repository: Arc<dyn AccessRepository>, grants: Arc<dyn GrantRepository>) -> Self {
        Self { repository, grants }
    }

    /// Loads a user row and filters it through the liveness predicate.
    async fn live_user(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self
            .repository
            .find_user(user_id)
            .await?
            .filter(Liveness::is_live))
    }

    /// Loads an account row and filters it through the liveness predicate.
    async fn live_account(&self, account_id: AccountId) -> AppResult<Option<Account>> {
        Ok(self
            .repository
            .find_account(account_id)
            .await?
            .filter(Liveness::is_live))
    }
}
