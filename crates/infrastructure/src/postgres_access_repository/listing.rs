use glasspane_domain::{
    Dashboard, Instance, InstanceId, Report, ReportId, Workspace, WorkspaceId,
};

use super::*;

/// Flattened dashboard catalog row. Every query producing this filters on
/// liveness, so the projected entities are rebuilt as live.
#[derive(sqlx::FromRow)]
struct CatalogRow {
    dashboard_id: i64,
    dashboard_name: String,
    external_dashboard_id: String,
    embed_id: Option<String>,
    report_id: i64,
    report_name: String,
    workspace_id: i64,
    workspace_name: String,
    instance_id: Option<i64>,
    instance_name: Option<String>,
    instance_base_url: Option<String>,
    instance_credential_ref: Option<String>,
}

impl CatalogRow {
    fn into_context(self) -> AppResult<DashboardContext> {
        let decode_error = |error: AppError| {
            AppError::Internal(format!(
                "failed to decode catalog row for dashboard '{}': {error}",
                self.dashboard_id
            ))
        };

        let instance = match (
            self.instance_id,
            self.instance_name.clone(),
            self.instance_base_url.clone(),
            self.instance_credential_ref.clone(),
        ) {
            (Some(id), Some(name), Some(base_url), Some(credential_ref)) => Some(
                Instance::new(InstanceId::new(id), name, base_url, credential_ref, true, None)
                    .map_err(decode_error)?,
            ),
            _ => None,
        };

        Ok(DashboardContext {
            dashboard: Dashboard::new(
                DashboardId::new(self.dashboard_id),
                ReportId::new(self.report_id),
                self.dashboard_name.clone(),
                self.external_dashboard_id.clone(),
                self.embed_id.clone(),
                true,
                None,
            )
            .map_err(decode_error)?,
            report: Report::new(
                ReportId::new(self.report_id),
                WorkspaceId::new(self.workspace_id),
                self.report_name.clone(),
                true,
                None,
            )
            .map_err(decode_error)?,
            workspace: Workspace::new(
                WorkspaceId::new(self.workspace_id),
                self.workspace_name.clone(),
                true,
                None,
            )
            .map_err(decode_error)?,
            instance,
        })
    }
}

const CATALOG_COLUMNS: &str = r#"
    dashboards.id AS dashboard_id,
    dashboards.name AS dashboard_name,
    dashboards.external_dashboard_id,
    dashboards.embed_id,
    reports.id AS report_id,
    reports.name AS report_name,
    workspaces.id AS workspace_id,
    workspaces.name AS workspace_name
"#;

const TENANT_CATALOG_COLUMNS: &str = r#"
    instances.id AS instance_id,
    instances.name AS instance_name,
    instances.base_url AS instance_base_url,
    instances.credential_ref AS instance_credential_ref
"#;

impl PostgresAccessRepository {
    pub(super) async fn list_live_dashboards_impl(&self) -> AppResult<Vec<DashboardContext>> {
        let query = format!(
            r#"
            SELECT
                {CATALOG_COLUMNS},
                NULL::BIGINT AS instance_id,
                NULL::TEXT AS instance_name,
                NULL::TEXT AS instance_base_url,
                NULL::TEXT AS instance_credential_ref
            FROM dashboards
            INNER JOIN reports ON reports.id = dashboards.report_id
            INNER JOIN workspaces ON workspaces.id = reports.workspace_id
            WHERE {dashboards_live}
                AND {reports_live}
                AND {workspaces_live}
            ORDER BY dashboards.id
            "#,
            dashboards_live = live("dashboards"),
            reports_live = live("reports"),
            workspaces_live = live("workspaces"),
        );

        let rows = sqlx::query_as::<_, CatalogRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to list live dashboards: {error}"))
            })?;

        rows.into_iter().map(CatalogRow::into_context).collect()
    }

    pub(super) async fn list_dashboards_enabled_for_account_impl(
        &self,
        account_id: AccountId,
    ) -> AppResult<Vec<DashboardContext>> {
        // DISTINCT ON collapses dashboards enabled through more than one
        // instance to the lowest instance id.
        let query = format!(
            r#"
            SELECT DISTINCT ON (dashboards.id)
                {CATALOG_COLUMNS},
                {TENANT_CATALOG_COLUMNS}
            FROM dashboards
            INNER JOIN reports ON reports.id = dashboards.report_id
            INNER JOIN workspaces ON workspaces.id = reports.workspace_id
            INNER JOIN account_instance_workspaces AS enablements
                ON enablements.workspace_id = workspaces.id
            INNER JOIN account_instances AS links
                ON links.id = enablements.account_instance_id
            INNER JOIN accounts ON accounts.id = links.account_id
            INNER JOIN instances ON instances.id = links.instance_id
            WHERE accounts.id = $1
                AND {dashboards_live}
                AND {reports_live}
                AND {workspaces_live}
                AND {enablements_live}
                AND {links_live}
                AND {accounts_live}
            ORDER BY dashboards.id, instances.id
            "#,
            dashboards_live = live("dashboards"),
            reports_live = live("reports"),
            workspaces_live = live("workspaces"),
            enablements_live = live("enablements"),
            links_live = live("links"),
            accounts_live = live("accounts"),
        );

        let rows = sqlx::query_as::<_, CatalogRow>(&query)
            .bind(account_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to list enabled dashboards: {error}"))
            })?;

        rows.into_iter().map(CatalogRow::into_context).collect()
    }

    pub(super) async fn list_dashboards_granted_to_user_impl(
        &self,
        account_id: AccountId,
        user_id: UserId,
    ) -> AppResult<Vec<DashboardContext>> {
        let query = format!(
            r#"
            SELECT DISTINCT ON (dashboards.id)
                {CATALOG_COLUMNS},
                {TENANT_CATALOG_COLUMNS}
            FROM dashboards
            INNER JOIN reports ON reports.id = dashboards.report_id
            INNER JOIN workspaces ON workspaces.id = reports.workspace_id
            INNER JOIN account_instance_workspaces AS enablements
                ON enablements.workspace_id = workspaces.id
            INNER JOIN account_instances AS links
                ON links.id = enablements.account_instance_id
            INNER JOIN accounts ON accounts.id = links.account_id
            INNER JOIN instances ON instances.id = links.instance_id
            INNER JOIN user_dashboards
                ON user_dashboards.dashboard_id = dashboards.id
            WHERE accounts.id = $1
                AND user_dashboards.user_id = $2
                AND {dashboards_live}
                AND {reports_live}
                AND {workspaces_live}
                AND {enablements_live}
                AND {links_live}
                AND {accounts_live}
                AND {grants_live}
            ORDER BY dashboards.id, instances.id
            "#,
            dashboards_live = live("dashboards"),
            reports_live = live("reports"),
            workspaces_live = live("workspaces"),
            enablements_live = live("enablements"),
            links_live = live("links"),
            accounts_live = live("accounts"),
            grants_live = live("user_dashboards"),
        );

        let rows = sqlx::query_as::<_, CatalogRow>(&query)
            .bind(account_id.as_i64())
            .bind(user_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to list granted dashboards: {error}"))
            })?;

        rows.into_iter().map(CatalogRow::into_context).collect()
    }
}
