use std::collections::BTreeSet;

use super::*;

impl AccessService {
    /// Returns the names of all roles held through live assignment rows.
    ///
    /// Lookup failures resolve to the empty set: downstream every decision
    /// treats a role-less user as unauthenticated-equivalent, so a store
    /// error can only ever narrow access.
    pub async fn get_user_roles(&self, user_id: UserId) -> BTreeSet<RoleName> {
        match self.repository.list_role_names_for_user(user_id).await {
            Ok(roles) => roles,
            Err(error) => {
                tracing::warn!(%user_id, %error, "role lookup failed, treating as no roles");
                BTreeSet::new()
            }
        }
    }

    /// Returns whether the user holds the given role.
    pub async fn user_has_role(&self, user_id: UserId, role: RoleName) -> bool {
        self.get_user_roles(user_id).await.contains(&role)
    }

    /// Returns whether the user is a root admin.
    pub async fn is_root_admin(&self, user_id: UserId) -> bool {
        self.user_has_role(user_id, RoleName::RootAdmin).await
    }

    /// Returns whether the user is a tenant admin.
    pub async fn is_tenant_admin(&self, user_id: UserId) -> bool {
        self.user_has_role(user_id, RoleName::TenantAdmin).await
    }

    /// Classifies the user's live role set into an effective access role.
    pub(super) async fn classify_role(&self, user_id: UserId) -> AppResult<Option<AccessRole>> {
        let roles = self.repository.list_role_names_for_user(user_id).await?;
        Ok(AccessRole::classify(&roles))
    }
}
