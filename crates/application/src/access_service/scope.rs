use super::*;

impl AccessService {
    /// Resolves the tenant boundary for a caller.
    ///
    /// Root admins are unrestricted. Everyone else is bounded by their own
    /// account; a missing, inactive or soft-deleted account resolves to
    /// [`TenantScope::Denied`] so tenant suspension revokes all derived
    /// access on the next check, without per-user updates.
    pub async fn get_user_tenant_scope(&self, user_id: UserId) -> TenantScope {
        match self.tenant_scope_impl(user_id).await {
            Ok(scope) => scope,
            Err(error) => {
                tracing::warn!(%user_id, %error, "tenant scope resolution failed, denying");
                TenantScope::Denied
            }
        }
    }

    /// Returns whether the caller may operate on resources of the target
    /// account: unrestricted callers always may, tenant-bound callers only
    /// within their own account. Tenant-scoped writes must pass this check
    /// before touching another user's rows.
    pub async fn validate_tenant_scope(&self, user_id: UserId, target: AccountId) -> bool {
        match self.get_user_tenant_scope(user_id).await {
            TenantScope::Unrestricted => true,
            TenantScope::Account(account_id) => account_id == target,
            TenantScope::Denied => false,
        }
    }

    pub(super) async fn tenant_scope_impl(&self, user_id: UserId) -> AppResult<TenantScope> {
        let Some(user) = self.live_user(user_id).await? else {
            return Ok(TenantScope::Denied);
        };

        match self.classify_role(user_id).await? {
            Some(AccessRole::RootAdmin) => Ok(TenantScope::Unrestricted),
            Some(AccessRole::TenantAdmin | AccessRole::Member) => {
                let Some(account_id) = user.account_id() else {
                    return Ok(TenantScope::Denied);
                };

                match self.live_account(account_id).await? {
                    Some(_) => Ok(TenantScope::Account(account_id)),
                    None => Ok(TenantScope::Denied),
                }
            }
            None => Ok(TenantScope::Denied),
        }
    }
}
