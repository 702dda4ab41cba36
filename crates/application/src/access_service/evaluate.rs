use super::*;

impl AccessService {
    /// Decides whether the user may open the dashboard.
    ///
    /// Never raises: any internal failure is logged and resolves to
    /// `false`. The decision must agree with
    /// [`AccessService::list_accessible_dashboards`] for every pair of
    /// user and dashboard.
    pub async fn can_access_dashboard(&self, user_id: UserId, dashboard_id: DashboardId) -> bool {
        match self.can_access_dashboard_impl(user_id, dashboard_id).await {
            Ok(allowed) => allowed,
            Err(error) => {
                tracing::warn!(%user_id, %dashboard_id, %error, "access check failed, denying");
                false
            }
        }
    }

    pub(super) async fn can_access_dashboard_impl(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        let Some(user) = self.live_user(user_id).await? else {
            return Ok(false);
        };

        match self.classify_role(user_id).await? {
            // Root admins see every structurally reachable dashboard, with
            // no tenant constraint: no enablement link is consulted.
            Some(AccessRole::RootAdmin) => {
                self.repository.dashboard_chain_is_live(dashboard_id).await
            }
            Some(role @ (AccessRole::TenantAdmin | AccessRole::Member)) => {
                let Some(account_id) = user.account_id() else {
                    return Ok(false);
                };

                if self.live_account(account_id).await?.is_none() {
                    return Ok(false);
                }

                let enabled = self
                    .repository
                    .dashboard_enabled_for_account(account_id, dashboard_id)
                    .await?;
                if !enabled {
                    // An explicit grant alone is never sufficient: the
                    // enablement chain must resolve within the caller's own
                    // tenant first.
                    return Ok(false);
                }

                match role {
                    AccessRole::TenantAdmin => Ok(true),
                    _ => {
                        self.repository
                            .dashboard_grant_exists(user_id, dashboard_id)
                            .await
                    }
                }
            }
            None => Ok(false),
        }
    }
}
