use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::{
    errors::ServiceError,
    services::orders::{
        AddCommentRequest, AssignTechnologistRequest, AttachFileRequest, CreateOrderRequest,
        MaterialsUpdate, UpdateOrderStatusRequest,
    },
    ApiResponse, AppState, ListQuery,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order).delete(delete_order))
        .route("/:id/status", put(update_order_status))
        .route("/:id/technologist", put(assign_technologist))
        .route("/:id/materials", put(update_materials))
        .route("/:id/comments", post(add_comment).get(list_comments))
        .route("/:id/files", post(attach_file).get(list_files))
        .route("/by-number/:order_number", get(get_order_by_number))
}

async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.orders.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order))))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.orders.get_order(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

async fn get_order_by_number(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .orders
        .get_order_by_number(&order_number)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state
        .services
        .orders
        .list_orders(query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(orders)))
}

async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.orders.update_order_status(id, request).await?;
    Ok(Json(ApiResponse::success(order)))
}

async fn assign_technologist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignTechnologistRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .orders
        .assign_technologist(id, request)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

async fn update_materials(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<MaterialsUpdate>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.orders.update_materials(id, update).await?;
    Ok(Json(ApiResponse::success(order)))
}

async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let comment = state.services.orders.add_comment(id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}

async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let comments = state.services.orders.list_comments(id).await?;
    Ok(Json(ApiResponse::success(comments)))
}

async fn attach_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttachFileRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let file = state.services.orders.attach_file(id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(file))))
}

async fn list_files(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let files = state.services.orders.list_files(id).await?;
    Ok(Json(ApiResponse::success(files)))
}
