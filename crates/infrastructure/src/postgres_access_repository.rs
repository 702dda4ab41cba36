use std::collections::BTreeSet;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use glasspane_application::{AccessRepository, DashboardContext};
use glasspane_core::{AccountId, AppError, AppResult, UserId};
use glasspane_domain::{Account, DashboardId, RoleName, UserRecord};
use sqlx::PgPool;

mod chain;
mod listing;

/// PostgreSQL-backed access resolution repository.
#[derive(Clone)]
pub struct PostgresAccessRepository {
    pool: PgPool,
}

impl PostgresAccessRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Renders the liveness predicate for one table alias.
///
/// Every access query must filter every joined table through this; building
/// the fragment in one place keeps a forgotten `deleted_at` filter from
/// silently widening access. Only static aliases are ever interpolated;
/// values still go through binds.
pub(crate) fn live(alias: &str) -> String {
    format!("{alias}.active = TRUE AND {alias}.deleted_at IS NULL")
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    account_id: Option<i64>,
    email: String,
    active: bool,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    subdomain: String,
    active: bool,
    deleted_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl AccessRepository for PostgresAccessRepository {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, account_id, email, active, deleted_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load user: {error}")))?;

        row.map(|row| {
            UserRecord::new(
                UserId::new(row.id),
                row.account_id.map(AccountId::new),
                row.email,
                row.active,
                row.deleted_at,
            )
            .map_err(|error| {
                AppError::Internal(format!("failed to decode user '{}': {error}", row.id))
            })
        })
        .transpose()
    }

    async fn find_account(&self, account_id: AccountId) -> AppResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, subdomain, active, deleted_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(account_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load account: {error}")))?;

        row.map(|row| {
            Account::new(
                AccountId::new(row.id),
                row.name,
                row.subdomain,
                row.active,
                row.deleted_at,
            )
            .map_err(|error| {
                AppError::Internal(format!("failed to decode account '{}': {error}", row.id))
            })
        })
        .transpose()
    }

    async fn list_role_names_for_user(&self, user_id: UserId) -> AppResult<BTreeSet<RoleName>> {
        let query = format!(
            r#"
            SELECT roles.name
            FROM user_roles
            INNER JOIN roles ON roles.id = user_roles.role_id
            WHERE user_roles.user_id = $1
                AND {user_roles_live}
                AND {roles_live}
            "#,
            user_roles_live = live("user_roles"),
            roles_live = live("roles"),
        );

        let names = sqlx::query_scalar::<_, String>(&query)
            .bind(user_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load roles: {error}")))?;

        names
            .into_iter()
            .map(|name| {
                RoleName::from_str(name.as_str()).map_err(|error| {
                    AppError::Internal(format!(
                        "failed to decode role '{name}' for user '{user_id}': {error}"
                    ))
                })
            })
            .collect()
    }

    async fn dashboard_chain_is_live(&self, dashboard_id: DashboardId) -> AppResult<bool> {
        self.dashboard_chain_is_live_impl(dashboard_id).await
    }

    async fn dashboard_enabled_for_account(
        &self,
        account_id: AccountId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        self.dashboard_enabled_for_account_impl(account_id, dashboard_id)
            .await
    }

    async fn dashboard_grant_exists(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        self.dashboard_grant_exists_impl(user_id, dashboard_id)
            .await
    }

    async fn list_live_dashboards(&self) -> AppResult<Vec<DashboardContext>> {
        self.list_live_dashboards_impl().await
    }

    async fn list_dashboards_enabled_for_account(
        &self,
        account_id: AccountId,
    ) -> AppResult<Vec<DashboardContext>> {
        self.list_dashboards_enabled_for_account_impl(account_id)
            .await
    }

    async fn list_dashboards_granted_to_user(
        &self,
        account_id: AccountId,
        user_id: UserId,
    ) -> AppResult<Vec<DashboardContext>> {
        self.list_dashboards_granted_to_user_impl(account_id, user_id)
            .await
    }
}
