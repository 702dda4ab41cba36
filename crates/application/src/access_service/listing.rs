use crate::access_ports::DashboardContext;

use super::*;

impl AccessService {
    /// Lists every dashboard the user may open, with catalog context.
    ///
    /// Mirrors the three branches of
    /// [`AccessService::can_access_dashboard`] as set-returning queries: a
    /// dashboard appears here exactly when the single check allows it.
    /// Store failures resolve to the empty list (logged), the deny
    /// direction for a listing.
    pub async fn list_accessible_dashboards(&self, user_id: UserId) -> Vec<DashboardContext> {
        match self.list_accessible_dashboards_impl(user_id).await {
            Ok(dashboards) => dashboards,
            Err(error) => {
                tracing::warn!(%user_id, %error, "dashboard listing failed, returning none");
                Vec::new()
            }
        }
    }

    pub(super) async fn list_accessible_dashboards_impl(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<DashboardContext>> {
        let Some(user) = self.live_user(user_id).await? else {
            return Ok(Vec::new());
        };

        match self.classify_role(user_id).await? {
            Some(AccessRole::RootAdmin) => self.repository.list_live_dashboards().await,
            Some(role @ (AccessRole::TenantAdmin | AccessRole::Member)) => {
                let Some(account_id) = user.account_id() else {
                    return Ok(Vec::new());
                };

                if self.live_account(account_id).await?.is_none() {
                    return Ok(Vec::new());
                }

                match role {
                    AccessRole::TenantAdmin => {
                        self.repository
                            .list_dashboards_enabled_for_account(account_id)
                            .await
                    }
                    _ => {
                        self.repository
                            .list_dashboards_granted_to_user(account_id, user_id)
                            .await
                    }
                }
            }
            None => Ok(Vec::new()),
        }
    }
}
