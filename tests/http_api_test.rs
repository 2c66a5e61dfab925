mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use joinery_api::{entities::user::Department, services::order_rules};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use common::TestApp;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json_body = serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({}));
    (status, json_body)
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = TestApp::new().await;
    let router = app.router();

    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;
    let router = app.router();

    let (status, body) = send(&router, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Joinery API");
    assert!(body["components"]["schemas"]["OrderResponse"].is_object());
}

#[tokio::test]
async fn order_lifecycle_over_http() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;
    let router = app.router();

    let (status, created) = send(
        &router,
        Method::POST,
        "/api/v1/orders",
        Some(json!({
            "customer_id": customer.id,
            "manager_id": manager.id,
            "order_type": "Н",
            "month": 10,
            "week": 4
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let order_number = created["data"]["order_number"].as_str().unwrap().to_string();
    let order_id = created["data"]["id"].as_str().unwrap().to_string();
    assert!(order_number.ends_with("Н"));

    let (status, fetched) = send(
        &router,
        Method::GET,
        &format!("/api/v1/orders/by-number/{order_number}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["id"], order_id.as_str());

    let (status, updated) = send(
        &router,
        Method::PUT,
        &format!("/api/v1/orders/{order_id}/status"),
        Some(json!({ "status": "in_progress" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], "in_progress");
    assert_eq!(updated["data"]["order_number"], order_number.as_str());
}

#[tokio::test]
async fn validation_failures_surface_as_422_with_fields() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;
    let router = app.router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/orders",
        Some(json!({
            "customer_id": customer.id,
            "manager_id": manager.id,
            "order_type": "Н",
            "sub_order_type": "ДОП",
            "month": 10,
            "week": 6
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["fields"]["parent_order_id"][0],
        order_rules::PARENT_REQUIRED
    );
    assert_eq!(body["fields"]["week"][0], order_rules::WEEK_BOUND);
}

#[tokio::test]
async fn missing_order_is_404() {
    let app = TestApp::new().await;
    let router = app.router();

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/v1/orders/{}", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn dashboardless_user_is_redirected_to_login() {
    let app = TestApp::new().await;
    let storekeeper = app
        .seed_user("storekeeper", Some(Department::Supply))
        .await;
    let router = app.router();

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/api/v1/users/{}/dashboard", storekeeper.id))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login"
    );
}
