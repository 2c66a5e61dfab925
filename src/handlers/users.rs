use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    errors::ServiceError, services::users::CreateUserRequest, ApiResponse, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user))
        .route("/:id/dashboard", get(user_dashboard))
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    /// Production-week narrowing for the technical dashboard.
    week: Option<i32>,
}

async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.services.users.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.services.users.get_user(id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// Routes the actor to their department dashboard; users without a routed
/// department are sent back to the login view.
async fn user_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    match state
        .services
        .dashboards
        .dashboard_for(id, query.week)
        .await?
    {
        Some(dashboard) => Ok(Json(ApiResponse::success(dashboard)).into_response()),
        None => Ok(Redirect::to("/login").into_response()),
    }
}
