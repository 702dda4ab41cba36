use super::*;

impl PostgresAccessRepository {
    pub(super) async fn dashboard_chain_is_live_impl(
        &self,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        let query = format!(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM dashboards
                INNER JOIN reports ON reports.id = dashboards.report_id
                INNER JOIN workspaces ON workspaces.id = reports.workspace_id
                WHERE dashboards.id = $1
                    AND {dashboards_live}
                    AND {reports_live}
                    AND {workspaces_live}
            )
            "#,
            dashboards_live = live("dashboards"),
            reports_live = live("reports"),
            workspaces_live = live("workspaces"),
        );

        sqlx::query_scalar::<_, bool>(&query)
            .bind(dashboard_id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to check dashboard chain: {error}"))
            })
    }

    pub(super) async fn dashboard_enabled_for_account_impl(
        &self,
        account_id: AccountId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        let query = format!(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM dashboards
                INNER JOIN reports ON reports.id = dashboards.report_id
                INNER JOIN workspaces ON workspaces.id = reports.workspace_id
                INNER JOIN account_instance_workspaces AS enablements
                    ON enablements.workspace_id = workspaces.id
                INNER JOIN account_instances AS links
                    ON links.id = enablements.account_instance_id
                INNER JOIN accounts ON accounts.id = links.account_id
                WHERE dashboards.id = $1
                    AND accounts.id = $2
                    AND {dashboards_live}
                    AND {reports_live}
                    AND {workspaces_live}
                    AND {enablements_live}
                    AND {links_live}
                    AND {accounts_live}
            )
            "#,
            dashboards_live = live("dashboards"),
            reports_live = live("reports"),
            workspaces_live = live("workspaces"),
            enablements_live = live("enablements"),
            links_live = live("links"),
            accounts_live = live("accounts"),
        );

        sqlx::query_scalar::<_, bool>(&query)
            .bind(dashboard_id.as_i64())
            .bind(account_id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to check workspace enablement: {error}"))
            })
    }

    pub(super) async fn dashboard_grant_exists_impl(
        &self,
        user_id: UserId,
        dashboard_id: DashboardId,
    ) -> AppResult<bool> {
        let query = format!(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM user_dashboards
                WHERE user_dashboards.user_id = $1
                    AND user_dashboards.dashboard_id = $2
                    AND {grants_live}
            )
            "#,
            grants_live = live("user_dashboards"),
        );

        sqlx::query_scalar::<_, bool>(&query)
            .bind(user_id.as_i64())
            .bind(dashboard_id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to check dashboard grant: {error}"))
            })
    }
}
