mod common;

use joinery_api::{
    entities::{order::SubOrderType, user::Department},
    errors::ServiceError,
    services::customers::{CreateCustomerRequest, UpdateCustomerRequest},
    services::order_rules,
};
use uuid::Uuid;

use common::{order_request, TestApp};

#[tokio::test]
async fn sub_order_without_parent_is_rejected() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let mut request = order_request(customer.id, manager.id);
    request.sub_order_type = Some(SubOrderType::Claim);

    let err = app
        .services
        .orders
        .create_order(request)
        .await
        .expect_err("sub-order without parent must fail");
    match err {
        ServiceError::Validation(failures) => {
            assert_eq!(
                failures.messages_for("parent_order_id"),
                [order_rules::PARENT_REQUIRED]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn week_above_five_is_rejected() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let mut request = order_request(customer.id, manager.id);
    request.week = Some(6);

    let err = app
        .services
        .orders
        .create_order(request)
        .await
        .expect_err("week 6 must fail");
    match err {
        ServiceError::Validation(failures) => {
            assert_eq!(failures.messages_for("week"), [order_rules::WEEK_BOUND]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn week_five_is_accepted() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let mut request = order_request(customer.id, manager.id);
    request.week = Some(5);

    let order = app
        .services
        .orders
        .create_order(request)
        .await
        .expect("week 5 is the upper bound");
    assert_eq!(order.week, Some(5));
}

#[tokio::test]
async fn manager_outside_commercial_is_rejected() {
    let app = TestApp::new().await;
    let manager = app.seed_user("storekeeper", Some(Department::Supply)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let err = app
        .services
        .orders
        .create_order(order_request(customer.id, manager.id))
        .await
        .expect_err("supply user cannot manage orders");
    match err {
        ServiceError::Validation(failures) => {
            assert_eq!(
                failures.messages_for("manager_id"),
                [order_rules::MANAGER_NOT_COMMERCIAL]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn technologist_outside_design_is_rejected() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let impostor = app
        .seed_user("impostor", Some(Department::Technical))
        .await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let mut request = order_request(customer.id, manager.id);
    request.technologist_id = Some(impostor.id);

    let err = app
        .services
        .orders
        .create_order(request)
        .await
        .expect_err("technical user cannot be the technologist");
    match err {
        ServiceError::Validation(failures) => {
            assert_eq!(
                failures.messages_for("technologist_id"),
                [order_rules::TECHNOLOGIST_NOT_DESIGN]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn failures_are_collected_not_short_circuited() {
    let app = TestApp::new().await;
    let manager = app.seed_user("clerk", Some(Department::Technical)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let mut request = order_request(customer.id, manager.id);
    request.sub_order_type = Some(SubOrderType::Supplement);
    request.week = Some(7);

    let err = app
        .services
        .orders
        .create_order(request)
        .await
        .expect_err("multiple rules broken");
    match err {
        ServiceError::Validation(failures) => {
            assert_eq!(
                failures.messages_for("parent_order_id"),
                [order_rules::PARENT_REQUIRED]
            );
            assert_eq!(failures.messages_for("week"), [order_rules::WEEK_BOUND]);
            assert_eq!(
                failures.messages_for("manager_id"),
                [order_rules::MANAGER_NOT_COMMERCIAL]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_parent_order_is_not_found() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let mut request = order_request(customer.id, manager.id);
    request.sub_order_type = Some(SubOrderType::Supplement);
    request.parent_order_id = Some(Uuid::new_v4());

    let err = app
        .services
        .orders
        .create_order(request)
        .await
        .expect_err("dangling parent reference");
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn customer_manager_must_be_commercial() {
    let app = TestApp::new().await;
    let designer = app.seed_user("designer", Some(Department::Design)).await;

    let err = app
        .services
        .customers
        .create_customer(CreateCustomerRequest {
            name: Some("Bad Manager Co".to_string()),
            city: None,
            code: Some("BMC".to_string()),
            manager_id: Some(designer.id),
        })
        .await
        .expect_err("design user cannot manage a customer");
    match err {
        ServiceError::Validation(failures) => {
            assert_eq!(
                failures.messages_for("manager_id"),
                [order_rules::MANAGER_NOT_COMMERCIAL]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn customer_update_checks_new_manager() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let designer = app.seed_user("designer", Some(Department::Design)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let err = app
        .services
        .customers
        .update_customer(
            customer.id,
            UpdateCustomerRequest {
                name: None,
                city: None,
                manager_id: Some(designer.id),
            },
        )
        .await
        .expect_err("reassignment to a design user must fail");
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn duplicate_customer_code_conflicts() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    app.seed_customer("First", Some("TST"), Some(manager.id))
        .await;

    let err = app
        .services
        .customers
        .create_customer(CreateCustomerRequest {
            name: Some("Second".to_string()),
            city: None,
            code: Some("TST".to_string()),
            manager_id: Some(manager.id),
        })
        .await
        .expect_err("code reuse must conflict");
    assert!(matches!(err, ServiceError::Conflict(_)));
}
