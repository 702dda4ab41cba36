use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use glasspane_core::{CallerIdentity, UserId};
use glasspane_domain::DashboardId;

use crate::dto::{AssignRoleRequest, GrantDashboardRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn grant_dashboard_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(user_id): Path<i64>,
    Json(payload): Json<GrantDashboardRequest>,
) -> ApiResult<StatusCode> {
    state
        .access_service
        .grant_dashboard_to_user(
            caller.user_id(),
            UserId::new(user_id),
            DashboardId::new(payload.dashboard_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn revoke_dashboard_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path((user_id, dashboard_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .access_service
        .revoke_dashboard_from_user(
            caller.user_id(),
            UserId::new(user_id),
            DashboardId::new(dashboard_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(user_id): Path<i64>,
    Json(payload): Json<AssignRoleRequest>,
) -> ApiResult<StatusCode> {
    state
        .access_service
        .assign_role_to_user(caller.user_id(), UserId::new(user_id), payload.role)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
