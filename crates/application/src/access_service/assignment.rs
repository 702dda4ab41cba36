use super::*;

impl AccessService {
    /// Returns whether a tenant admin may grant the dashboard to the target
    /// user: both users must share one live account and the dashboard must
    /// be enabled for that account. A tenant admin cannot grant a dashboard
    /// their tenant does not have.
    ///
    /// This is deliberately the tenant-scoped rule only; the root-admin
    /// bypass belongs to the caller, not here.
    pub async fn can_assign_dashboard(
        &self,
        admin_user_id: UserId,
        target_user_id: UserId,
        dashboard_id: DashboardId,
    ) -> bool {
        match self
            .can_assign_dashboard_impl(admin_user_id, target_user_id, dashboard_id)
            .await
        {
            Ok(allowed) => allowed,
            Err(error) => {
                tracing::warn!(
                    %admin_user_id,
                    %target_user_id,
                    %dashboard_id,
                    %error,
                    "dashboard assignment check failed, denying"
                );
                false
            }
        }
    }

    /// Grants the dashboard to the target user.
    ///
    /// Root admins may grant any live dashboard to any live user; tenant
    /// admins must pass the tenant-scoped assignment rule. The write is
    /// idempotent: re-granting reactivates a revoked row.
    pub async fn grant_dashboard_to_user(
        &self,
        actor_user_id: UserId,
        target_user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<()> {
        let target = self
            .live_user(target_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{target_user_id}' not found")))?;

        match self.classify_role(actor_user_id).await? {
            Some(AccessRole::RootAdmin) => {
                if !self.repository.dashboard_chain_is_live(dashboard_id).await? {
                    return Err(AppError::NotFound(format!(
                        "dashboard '{dashboard_id}' not found"
                    )));
                }
            }
            Some(AccessRole::TenantAdmin) => {
                let allowed = self
                    .can_assign_dashboard_impl(actor_user_id, target_user_id, dashboard_id)
                    .await?;
                if !allowed {
                    return Err(AppError::Forbidden(format!(
                        "user '{actor_user_id}' may not assign dashboard '{dashboard_id}' to user '{target_user_id}'"
                    )));
                }
            }
            _ => {
                return Err(AppError::Forbidden(format!(
                    "user '{actor_user_id}' may not assign dashboards"
                )));
            }
        }

        self.grants
            .upsert_dashboard_grant(target.id(), dashboard_id)
            .await
    }

    /// Revokes the target user's explicit dashboard grant.
    pub async fn revoke_dashboard_from_user(
        &self,
        actor_user_id: UserId,
        target_user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<()> {
        let target = self
            .live_user(target_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{target_user_id}' not found")))?;

        let allowed = match self.classify_role(actor_user_id).await? {
            Some(AccessRole::RootAdmin) => true,
            Some(AccessRole::TenantAdmin) => match target.account_id() {
                Some(account_id) => self.validate_tenant_scope(actor_user_id, account_id).await,
                None => false,
            },
            _ => false,
        };

        if !allowed {
            return Err(AppError::Forbidden(format!(
                "user '{actor_user_id}' may not revoke dashboards from user '{target_user_id}'"
            )));
        }

        let revoked = self
            .grants
            .revoke_dashboard_grant(target.id(), dashboard_id)
            .await?;
        if !revoked {
            return Err(AppError::NotFound(format!(
                "no grant of dashboard '{dashboard_id}' to user '{target_user_id}'"
            )));
        }

        Ok(())
    }

    /// Assigns a role to the target user.
    ///
    /// Root admins may assign any role anywhere. Tenant admins may assign
    /// `tenant_admin` or `user` within their own tenant, never
    /// `root_admin`. The role/account pairing rule is validated in every
    /// case before the write.
    pub async fn assign_role_to_user(
        &self,
        actor_user_id: UserId,
        target_user_id: UserId,
        role: RoleName,
    ) -> AppResult<()> {
        let target = self
            .live_user(target_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{target_user_id}' not found")))?;

        let allowed = match self.classify_role(actor_user_id).await? {
            Some(AccessRole::RootAdmin) => true,
            Some(AccessRole::TenantAdmin) => {
                role != RoleName::RootAdmin
                    && match target.account_id() {
                        Some(account_id) => {
                            self.validate_tenant_scope(actor_user_id, account_id).await
                        }
                        None => false,
                    }
            }
            _ => false,
        };

        if !allowed {
            return Err(AppError::Forbidden(format!(
                "user '{actor_user_id}' may not assign role '{}' to user '{target_user_id}'",
                role.as_str()
            )));
        }

        validate_role_assignment(role, target.account_id())?;

        self.grants.upsert_role_assignment(target.id(), role).await
    }

    pub(super) async fn can_assign_dashboard_impl(
        &self,
        admin_user_id: UserId,
        target_user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        let Some(admin) = self.live_user(admin_user_id).await? else {
            return Ok(false);
        };
        let Some(target) = self.live_user(target_user_id).await? else {
            return Ok(false);
        };

        let (Some(admin_account), Some(target_account)) = (admin.account_id(), target.account_id())
        else {
            return Ok(false);
        };

        if admin_account != target_account {
            return Ok(false);
        }

        if self.live_account(admin_account).await?.is_none() {
            return Ok(false);
        }

        self.repository
            .dashboard_enabled_for_account(admin_account, dashboard_id)
            .await
    }
}
