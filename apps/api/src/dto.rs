use glasspane_application::DashboardContext;
use glasspane_domain::RoleName;
use serde::{Deserialize, Serialize};

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of an accessible dashboard with its embed context.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub id: i64,
    pub name: String,
    pub external_dashboard_id: String,
    pub embed_id: Option<String>,
    pub report: ReportResponse,
    pub workspace: WorkspaceResponse,
    pub instance: Option<InstanceResponse>,
}

/// Report portion of a dashboard context.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub id: i64,
    pub name: String,
}

/// Workspace portion of a dashboard context.
#[derive(Debug, Serialize)]
pub struct WorkspaceResponse {
    pub id: i64,
    pub name: String,
}

/// Serving backend portion of a dashboard context.
#[derive(Debug, Serialize)]
pub struct InstanceResponse {
    pub id: i64,
    pub name: String,
    pub base_url: String,
}

impl From<DashboardContext> for DashboardResponse {
    fn from(context: DashboardContext) -> Self {
        Self {
            id: context.dashboard.id().as_i64(),
            name: context.dashboard.name().as_str().to_owned(),
            external_dashboard_id: context.dashboard.external_dashboard_id().as_str().to_owned(),
            embed_id: context
                .dashboard
                .embed_id()
                .map(|embed_id| embed_id.as_str().to_owned()),
            report: ReportResponse {
                id: context.report.id().as_i64(),
                name: context.report.name().as_str().to_owned(),
            },
            workspace: WorkspaceResponse {
                id: context.workspace.id().as_i64(),
                name: context.workspace.name().as_str().to_owned(),
            },
            instance: context.instance.map(|instance| InstanceResponse {
                id: instance.id().as_i64(),
                name: instance.name().as_str().to_owned(),
                base_url: instance.base_url().to_string(),
            }),
        }
    }
}

/// Incoming payload for a dashboard grant.
#[derive(Debug, Deserialize)]
pub struct GrantDashboardRequest {
    pub dashboard_id: i64,
}

/// Incoming payload for a role assignment.
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role: RoleName,
}

#[cfg(test)]
mod tests {
    use glasspane_application::DashboardContext;
    use glasspane_domain::{
        Dashboard, DashboardId, Report, ReportId, Workspace, WorkspaceId,
    };

    use super::{AssignRoleRequest, DashboardResponse};

    fn context() -> DashboardContext {
        DashboardContext {
            dashboard: Dashboard::new(
                DashboardId::new(501),
                ReportId::new(200),
                "Revenue",
                "superset-41",
                Some("embed-41".to_owned()),
                true,
                None,
            )
            .unwrap_or_else(|_| unreachable!()),
            report: Report::new(ReportId::new(200), WorkspaceId::new(100), "Q1", true, None)
                .unwrap_or_else(|_| unreachable!()),
            workspace: Workspace::new(WorkspaceId::new(100), "Sales", true, None)
                .unwrap_or_else(|_| unreachable!()),
            instance: None,
        }
    }

    #[test]
    fn dashboard_response_flattens_the_context() {
        let response = DashboardResponse::from(context());
        let value = serde_json::to_value(&response).unwrap_or_else(|_| unreachable!());

        assert_eq!(value["id"], 501);
        assert_eq!(value["embed_id"], "embed-41");
        assert_eq!(value["report"]["name"], "Q1");
        assert!(value["instance"].is_null());
    }

    #[test]
    fn role_names_deserialize_in_snake_case() {
        let request: AssignRoleRequest =
            serde_json::from_str(r#"{"role":"tenant_admin"}"#).unwrap_or_else(|_| unreachable!());
        assert_eq!(request.role, glasspane_domain::RoleName::TenantAdmin);
    }
}
