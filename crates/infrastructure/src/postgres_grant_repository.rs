use async_trait::async_trait;
use glasspane_application::GrantRepository;
use glasspane_core::{AppError, AppResult, UserId};
use glasspane_domain::{DashboardId, RoleName};
use sqlx::PgPool;

use crate::postgres_access_repository::live;

/// PostgreSQL-backed grant and role-assignment writer.
#[derive(Clone)]
pub struct PostgresGrantRepository {
    pool: PgPool,
}

impl PostgresGrantRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GrantRepository for PostgresGrantRepository {
    async fn upsert_dashboard_grant(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_dashboards (user_id, dashboard_id, active, deleted_at)
            VALUES ($1, $2, TRUE, NULL)
            ON CONFLICT (user_id, dashboard_id)
            DO UPDATE SET active = TRUE, deleted_at = NULL
            "#,
        )
        .bind(user_id.as_i64())
        .bind(dashboard_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to upsert dashboard grant: {error}")))?;

        tracing::debug!(%user_id, %dashboard_id, "dashboard grant stored");
        Ok(())
    }

    async fn revoke_dashboard_grant(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        let query = format!(
            r#"
            UPDATE user_dashboards
            SET active = FALSE, deleted_at = NOW()
            WHERE user_dashboards.user_id = $1
                AND user_dashboards.dashboard_id = $2
                AND {grants_live}
            "#,
            grants_live = live("user_dashboards"),
        );

        let result = sqlx::query(&query)
            .bind(user_id.as_i64())
            .bind(dashboard_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to revoke dashboard grant: {error}"))
            })?;

        let revoked = result.rows_affected() > 0;
        if revoked {
            tracing::debug!(%user_id, %dashboard_id, "dashboard grant revoked");
        }

        Ok(revoked)
    }

    async fn upsert_role_assignment(&self, user_id: UserId, role: RoleName) -> AppResult<()> {
        let query = format!(
            r#"
            INSERT INTO user_roles (user_id, role_id, active, deleted_at)
            SELECT $1, roles.id, TRUE, NULL
            FROM roles
            WHERE roles.name = $2 AND {roles_live}
            ON CONFLICT (user_id, role_id)
            DO UPDATE SET active = TRUE, deleted_at = NULL
            "#,
            roles_live = live("roles"),
        );

        let result = sqlx::query(&query)
            .bind(user_id.as_i64())
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to upsert role assignment: {error}"))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "role '{}' not found",
                role.as_str()
            )));
        }

        tracing::debug!(%user_id, role = role.as_str(), "role assignment stored");
        Ok(())
    }
}
