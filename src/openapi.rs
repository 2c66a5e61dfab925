use axum::Json;
use utoipa::OpenApi;

use crate::entities::order::{OrderStatus, OrderType, SubOrderType};
use crate::entities::user::Department;
use crate::errors::{ErrorResponse, ValidationFailures};
use crate::handlers::health::HealthResponse;
use crate::services::customers::{
    CreateCustomerRequest, CustomerListResponse, CustomerResponse, UpdateCustomerRequest,
};
use crate::services::dashboard::{DashboardResponse, DashboardView};
use crate::services::orders::{
    AddCommentRequest, AssignTechnologistRequest, AttachFileRequest, CreateOrderRequest,
    MaterialsUpdate, OrderListResponse, OrderResponse, UpdateOrderStatusRequest,
};
use crate::services::users::{CreateUserRequest, UserResponse};

/// OpenAPI component catalogue for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Joinery API",
        description = "Order management for a furniture/joinery manufacturer"
    ),
    components(schemas(
        ErrorResponse,
        ValidationFailures,
        HealthResponse,
        Department,
        OrderType,
        SubOrderType,
        OrderStatus,
        CreateOrderRequest,
        UpdateOrderStatusRequest,
        AssignTechnologistRequest,
        MaterialsUpdate,
        AddCommentRequest,
        AttachFileRequest,
        OrderResponse,
        OrderListResponse,
        CreateCustomerRequest,
        UpdateCustomerRequest,
        CustomerResponse,
        CustomerListResponse,
        CreateUserRequest,
        UserResponse,
        DashboardResponse,
        DashboardView,
    ))
)]
pub struct ApiDoc;

/// Handler behind `GET /api-docs/openapi.json`.
pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_core_schemas() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("Joinery API"));
        assert!(json.contains("OrderResponse"));
        assert!(json.contains("ValidationFailures"));
    }
}
