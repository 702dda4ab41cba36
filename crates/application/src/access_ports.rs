use std::collections::BTreeSet;

use async_trait::async_trait;
use glasspane_core::{AccountId, AppResult, UserId};
use glasspane_domain::{
    Account, Dashboard, DashboardId, Instance, Report, RoleName, UserRecord, Workspace,
};
use serde::Serialize;

/// Dashboard resolved together with its catalog context.
///
/// `instance` is the backend on the tenant's enablement chain; the
/// unscoped root-admin listing carries `None` because no single tenant
/// chain exists there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardContext {
    /// The accessible dashboard.
    pub dashboard: Dashboard,
    /// Owning report.
    pub report: Report,
    /// Owning workspace.
    pub workspace: Workspace,
    /// Serving instance, when resolved through a tenant enablement chain.
    pub instance: Option<Instance>,
}

/// Read port for access resolution queries.
///
/// Every predicate is expected to apply the liveness condition
/// (`active = TRUE AND deleted_at IS NULL`) to each row it touches; a dead
/// row anywhere in a chain breaks reachability entirely.
#[async_trait]
pub trait AccessRepository: Send + Sync {
    /// Finds a user row by id, live or not.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Finds an account row by id, live or not.
    async fn find_account(&self, account_id: AccountId) -> AppResult<Option<Account>>;

    /// Lists role names joined to the user through live role-assignment
    /// and role rows.
    async fn list_role_names_for_user(&self, user_id: UserId) -> AppResult<BTreeSet<RoleName>>;

    /// Returns whether a live Dashboard → Report → Workspace chain exists
    /// for the dashboard.
    async fn dashboard_chain_is_live(&self, dashboard_id: DashboardId) -> AppResult<bool>;

    /// Returns whether the live dashboard chain additionally passes through
    /// a live workspace enablement whose live account-instance link belongs
    /// to the given live account.
    async fn dashboard_enabled_for_account(
        &self,
        account_id: AccountId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool>;

    /// Returns whether a live explicit dashboard grant exists for the user.
    async fn dashboard_grant_exists(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool>;

    /// Lists every dashboard with a live catalog chain, unscoped.
    async fn list_live_dashboards(&self) -> AppResult<Vec<DashboardContext>>;

    /// Lists every dashboard enabled for the account, with the enablement
    /// chain's instance attached.
    async fn list_dashboards_enabled_for_account(
        &self,
        account_id: AccountId,
    ) -> AppResult<Vec<DashboardContext>>;

    /// Lists the account-enabled dashboards the user also holds a live
    /// explicit grant for.
    async fn list_dashboards_granted_to_user(
        &self,
        account_id: AccountId,
        user_id: UserId,
    ) -> AppResult<Vec<DashboardContext>>;
}

/// Write port for grant and role administration.
#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// Creates or reactivates an explicit dashboard grant. Idempotent.
    async fn upsert_dashboard_grant(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<()>;

    /// Soft-deletes an explicit dashboard grant. Returns `false` when no
    /// live grant existed.
    async fn revoke_dashboard_grant(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool>;

    /// Creates or reactivates a role assignment. Idempotent.
    async fn upsert_role_assignment(&self, user_id: UserId, role: RoleName) -> AppResult<()>;
}
