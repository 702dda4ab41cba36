use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use glasspane_application::{AccessRepository, DashboardContext, GrantRepository};
use glasspane_core::{AccountId, AppResult, UserId};
use glasspane_domain::{
    Account, AccountInstanceLink, Dashboard, DashboardGrant, DashboardId, Instance, InstanceId,
    Liveness, Report, ReportId, RoleAssignment, RoleName, UserRecord, Workspace,
    WorkspaceEnablement, WorkspaceId,
};
use tokio::sync::RwLock;

#[cfg(test)]
mod tests;

/// In-memory access repository implementation.
///
/// Serves as both the read and the write port. Mutation helpers mirror the
/// admin CRUD surface closely enough for scenario tests: inserts create
/// live rows, deactivation flips the `active` flag and soft deletion sets
/// `deleted_at`, leaving descendants untouched (there is no cascade).
#[derive(Debug, Default)]
pub struct InMemoryAccessRepository {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    users: HashMap<UserId, UserRecord>,
    role_assignments: Vec<RoleAssignment>,
    instances: HashMap<InstanceId, Instance>,
    instance_links: Vec<AccountInstanceLink>,
    workspaces: HashMap<WorkspaceId, Workspace>,
    enablements: Vec<WorkspaceEnablement>,
    reports: HashMap<ReportId, Report>,
    dashboards: BTreeMap<DashboardId, Dashboard>,
    grants: Vec<DashboardGrant>,
}

impl State {
    fn live_chain(
        &self,
        dashboard_id: DashboardId,
    ) -> Option<(&Dashboard, &Report, &Workspace)> {
        let dashboard = self
            .dashboards
            .get(&dashboard_id)
            .filter(|dashboard| dashboard.is_live())?;
        let report = self
            .reports
            .get(&dashboard.report_id())
            .filter(|report| report.is_live())?;
        let workspace = self
            .workspaces
            .get(&report.workspace_id())
            .filter(|workspace| workspace.is_live())?;
        Some((dashboard, report, workspace))
    }

    fn account_is_live(&self, account_id: AccountId) -> bool {
        self.accounts
            .get(&account_id)
            .is_some_and(Liveness::is_live)
    }

    fn workspace_enabled_for_account(
        &self,
        account_id: AccountId,
        workspace_id: WorkspaceId,
    ) -> bool {
        self.account_is_live(account_id)
            && self.enablements.iter().any(|enablement| {
                enablement.is_live()
                    && enablement.account_id == account_id
                    && enablement.workspace_id == workspace_id
                    && self.instance_links.iter().any(|link| {
                        link.is_live()
                            && link.account_id == enablement.account_id
                            && link.instance_id == enablement.instance_id
                    })
            })
    }

    fn dashboard_enabled_for_account(
        &self,
        account_id: AccountId,
        dashboard_id: DashboardId,
    ) -> bool {
        self.live_chain(dashboard_id)
            .is_some_and(|(_, _, workspace)| {
                self.workspace_enabled_for_account(account_id, workspace.id())
            })
    }

    fn grant_exists(&self, user_id: UserId, dashboard_id: DashboardId) -> bool {
        self.grants.iter().any(|grant| {
            grant.is_live() && grant.user_id == user_id && grant.dashboard_id == dashboard_id
        })
    }

    /// Instance on the account's live enablement chain for a workspace,
    /// lowest id first to match the SQL adapter's projection.
    fn enabling_instance(
        &self,
        account_id: AccountId,
        workspace_id: WorkspaceId,
    ) -> Option<&Instance> {
        self.enablements
            .iter()
            .filter(|enablement| {
                enablement.is_live()
                    && enablement.account_id == account_id
                    && enablement.workspace_id == workspace_id
                    && self.instance_links.iter().any(|link| {
                        link.is_live()
                            && link.account_id == enablement.account_id
                            && link.instance_id == enablement.instance_id
                    })
            })
            .filter_map(|enablement| self.instances.get(&enablement.instance_id))
            .min_by_key(|instance| instance.id())
    }
}

impl InMemoryAccessRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an account row.
    pub async fn insert_account(&self, account: Account) {
        self.state.write().await.accounts.insert(account.id(), account);
    }

    /// Stores a user row.
    pub async fn insert_user(&self, user: UserRecord) {
        self.state.write().await.users.insert(user.id(), user);
    }

    /// Stores an instance row.
    pub async fn insert_instance(&self, instance: Instance) {
        self.state
            .write()
            .await
            .instances
            .insert(instance.id(), instance);
    }

    /// Stores a workspace row.
    pub async fn insert_workspace(&self, workspace: Workspace) {
        self.state
            .write()
            .await
            .workspaces
            .insert(workspace.id(), workspace);
    }

    /// Stores a report row.
    pub async fn insert_report(&self, report: Report) {
        self.state.write().await.reports.insert(report.id(), report);
    }

    /// Stores a dashboard row.
    pub async fn insert_dashboard(&self, dashboard: Dashboard) {
        self.state
            .write()
            .await
            .dashboards
            .insert(dashboard.id(), dashboard);
    }

    /// Creates a live account-instance link.
    pub async fn link_account_instance(&self, account_id: AccountId, instance_id: InstanceId) {
        self.state.write().await.instance_links.push(AccountInstanceLink {
            account_id,
            instance_id,
            active: true,
            deleted_at: None,
        });
    }

    /// Enables a workspace for an account-instance pairing.
    pub async fn enable_workspace(
        &self,
        account_id: AccountId,
        instance_id: InstanceId,
        workspace_id: WorkspaceId,
    ) {
        self.state.write().await.enablements.push(WorkspaceEnablement {
            account_id,
            instance_id,
            workspace_id,
            active: true,
            deleted_at: None,
        });
    }

    /// Assigns a role directly, bypassing the service-level validators.
    pub async fn assign_role(&self, user_id: UserId, role: RoleName) {
        self.state.write().await.role_assignments.push(RoleAssignment {
            user_id,
            role,
            active: true,
            deleted_at: None,
        });
    }

    /// Stores a live explicit dashboard grant.
    pub async fn grant_dashboard(&self, user_id: UserId, dashboard_id: DashboardId) {
        self.state.write().await.grants.push(DashboardGrant {
            user_id,
            dashboard_id,
            active: true,
            deleted_at: None,
        });
    }

    /// Flips an account inactive.
    pub async fn deactivate_account(&self, account_id: AccountId) {
        let mut state = self.state.write().await;
        if let Some(account) = state.accounts.get(&account_id) {
            let replacement = Account::new(
                account.id(),
                account.name().as_str(),
                account.subdomain().as_str(),
                false,
                account.deleted_at(),
            );
            if let Ok(replacement) = replacement {
                state.accounts.insert(account_id, replacement);
            }
        }
    }

    /// Flips a workspace inactive.
    pub async fn deactivate_workspace(&self, workspace_id: WorkspaceId) {
        let mut state = self.state.write().await;
        if let Some(workspace) = state.workspaces.get(&workspace_id) {
            let replacement = Workspace::new(
                workspace.id(),
                workspace.name().as_str(),
                false,
                workspace.deleted_at(),
            );
            if let Ok(replacement) = replacement {
                state.workspaces.insert(workspace_id, replacement);
            }
        }
    }

    /// Soft-deletes a report, leaving its `active` flag untouched.
    pub async fn soft_delete_report(&self, report_id: ReportId) {
        let mut state = self.state.write().await;
        if let Some(report) = state.reports.get(&report_id) {
            let replacement = Report::new(
                report.id(),
                report.workspace_id(),
                report.name().as_str(),
                report.active(),
                Some(Utc::now()),
            );
            if let Ok(replacement) = replacement {
                state.reports.insert(report_id, replacement);
            }
        }
    }

    /// Flips a dashboard inactive.
    pub async fn deactivate_dashboard(&self, dashboard_id: DashboardId) {
        let mut state = self.state.write().await;
        if let Some(dashboard) = state.dashboards.get(&dashboard_id) {
            let replacement = Dashboard::new(
                dashboard.id(),
                dashboard.report_id(),
                dashboard.name().as_str(),
                dashboard.external_dashboard_id().as_str(),
                dashboard.embed_id().map(|value| value.as_str().to_owned()),
                false,
                dashboard.deleted_at(),
            );
            if let Ok(replacement) = replacement {
                state.dashboards.insert(dashboard_id, replacement);
            }
        }
    }

    /// Flips an account-instance link inactive.
    pub async fn deactivate_instance_link(&self, account_id: AccountId, instance_id: InstanceId) {
        let mut state = self.state.write().await;
        for link in &mut state.instance_links {
            if link.account_id == account_id && link.instance_id == instance_id {
                link.active = false;
            }
        }
    }

    /// Flips a workspace enablement inactive.
    pub async fn deactivate_enablement(
        &self,
        account_id: AccountId,
        instance_id: InstanceId,
        workspace_id: WorkspaceId,
    ) {
        let mut state = self.state.write().await;
        for enablement in &mut state.enablements {
            if enablement.account_id == account_id
                && enablement.instance_id == instance_id
                && enablement.workspace_id == workspace_id
            {
                enablement.active = false;
            }
        }
    }

    fn context_for(state: &State, dashboard_id: DashboardId, account_id: Option<AccountId>) -> Option<DashboardContext> {
        let (dashboard, report, workspace) = state.live_chain(dashboard_id)?;
        let instance = account_id
            .and_then(|account_id| state.enabling_instance(account_id, workspace.id()))
            .cloned();

        Some(DashboardContext {
            dashboard: dashboard.clone(),
            report: report.clone(),
            workspace: workspace.clone(),
            instance,
        })
    }
}

#[async_trait]
impl AccessRepository for InMemoryAccessRepository {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }

    async fn find_account(&self, account_id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.state.read().await.accounts.get(&account_id).cloned())
    }

    async fn list_role_names_for_user(&self, user_id: UserId) -> AppResult<BTreeSet<RoleName>> {
        Ok(self
            .state
            .read()
            .await
            .role_assignments
            .iter()
            .filter(|assignment| assignment.is_live() && assignment.user_id == user_id)
            .map(|assignment| assignment.role)
            .collect())
    }

    async fn dashboard_chain_is_live(&self, dashboard_id: DashboardId) -> AppResult<bool> {
        Ok(self.state.read().await.live_chain(dashboard_id).is_some())
    }

    async fn dashboard_enabled_for_account(
        &self,
        account_id: AccountId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        Ok(self
            .state
            .read()
            .await
            .dashboard_enabled_for_account(account_id, dashboard_id))
    }

    async fn dashboard_grant_exists(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        Ok(self.state.read().await.grant_exists(user_id, dashboard_id))
    }

    async fn list_live_dashboards(&self) -> AppResult<Vec<DashboardContext>> {
        let state = self.state.read().await;
        Ok(state
            .dashboards
            .keys()
            .filter_map(|dashboard_id| Self::context_for(&state, *dashboard_id, None))
            .collect())
    }

    async fn list_dashboards_enabled_for_account(
        &self,
        account_id: AccountId,
    ) -> AppResult<Vec<DashboardContext>> {
        let state = self.state.read().await;
        Ok(state
            .dashboards
            .keys()
            .filter(|dashboard_id| state.dashboard_enabled_for_account(account_id, **dashboard_id))
            .filter_map(|dashboard_id| Self::context_for(&state, *dashboard_id, Some(account_id)))
            .collect())
    }

    async fn list_dashboards_granted_to_user(
        &self,
        account_id: AccountId,
        user_id: UserId,
    ) -> AppResult<Vec<DashboardContext>> {
        let state = self.state.read().await;
        Ok(state
            .dashboards
            .keys()
            .filter(|dashboard_id| {
                state.dashboard_enabled_for_account(account_id, **dashboard_id)
                    && state.grant_exists(user_id, **dashboard_id)
            })
            .filter_map(|dashboard_id| Self::context_for(&state, *dashboard_id, Some(account_id)))
            .collect())
    }
}

#[async_trait]
impl GrantRepository for InMemoryAccessRepository {
    async fn upsert_dashboard_grant(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        for grant in &mut state.grants {
            if grant.user_id == user_id && grant.dashboard_id == dashboard_id {
                grant.active = true;
                grant.deleted_at = None;
                return Ok(());
            }
        }

        state.grants.push(DashboardGrant {
            user_id,
            dashboard_id,
            active: true,
            deleted_at: None,
        });
        Ok(())
    }

    async fn revoke_dashboard_grant(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let mut revoked = false;
        for grant in &mut state.grants {
            if grant.is_live() && grant.user_id == user_id && grant.dashboard_id == dashboard_id {
                grant.active = false;
                grant.deleted_at = Some(Utc::now());
                revoked = true;
            }
        }

        Ok(revoked)
    }

    async fn upsert_role_assignment(&self, user_id: UserId, role: RoleName) -> AppResult<()> {
        let mut state = self.state.write().await;
        for assignment in &mut state.role_assignments {
            if assignment.user_id == user_id && assignment.role == role {
                assignment.active = true;
                assignment.deleted_at = None;
                return Ok(());
            }
        }

        state.role_assignments.push(RoleAssignment {
            user_id,
            role,
            active: true,
            deleted_at: None,
        });
        Ok(())
    }
}
