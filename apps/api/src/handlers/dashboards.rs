use axum::Json;
use axum::extract::{Extension, Path, State};
use glasspane_core::{AppError, CallerIdentity};
use glasspane_domain::DashboardId;

use crate::dto::DashboardResponse;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn list_dashboards_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> ApiResult<Json<Vec<DashboardResponse>>> {
    let dashboards = state
        .access_service
        .list_accessible_dashboards(caller.user_id())
        .await
        .into_iter()
        .map(DashboardResponse::from)
        .collect();

    Ok(Json(dashboards))
}

/// Returns the embed context for one dashboard.
///
/// Denials are uniform: the response never distinguishes a missing
/// dashboard from a dead chain or an absent grant.
pub async fn get_dashboard_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(dashboard_id): Path<i64>,
) -> ApiResult<Json<DashboardResponse>> {
    let dashboard_id = DashboardId::new(dashboard_id);

    let allowed = state
        .access_service
        .can_access_dashboard(caller.user_id(), dashboard_id)
        .await;
    if !allowed {
        return Err(access_denied());
    }

    let context = state
        .access_service
        .list_accessible_dashboards(caller.user_id())
        .await
        .into_iter()
        .find(|context| context.dashboard.id() == dashboard_id)
        .ok_or_else(access_denied)?;

    Ok(Json(DashboardResponse::from(context)))
}

fn access_denied() -> ApiError {
    ApiError(AppError::Forbidden(
        "you do not have access to this dashboard".to_owned(),
    ))
}
