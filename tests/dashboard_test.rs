mod common;

use joinery_api::{
    entities::{
        order::{Entity as OrderEntity, OrderStatus},
        user::Department,
    },
    services::dashboard::DashboardView,
    services::orders::{MaterialsUpdate, UpdateOrderStatusRequest},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use common::{order_request, TestApp};

/// The technical dashboard keys on `technologist_id`, which row-level data
/// may carry for any user; write it directly instead of going through the
/// assignment rule.
async fn assign_directly(db: &DatabaseConnection, order_id: Uuid, user_id: Uuid) {
    let order = OrderEntity::find_by_id(order_id)
        .one(db)
        .await
        .expect("load order")
        .expect("order exists");
    let mut active = order.into_active_model();
    active.technologist_id = Set(Some(user_id));
    active.update(db).await.expect("assign technologist");
}

#[tokio::test]
async fn commercial_dashboard_shows_only_own_orders() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let colleague = app
        .seed_user("colleague", Some(Department::Commercial))
        .await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let mine = app
        .services
        .orders
        .create_order(order_request(customer.id, manager.id))
        .await
        .expect("manager's order");
    app.services
        .orders
        .create_order(order_request(customer.id, colleague.id))
        .await
        .expect("colleague's order");

    let dashboard = app
        .services
        .dashboards
        .dashboard_for(manager.id, None)
        .await
        .expect("dashboard")
        .expect("commercial view");

    assert_eq!(dashboard.view, DashboardView::Commercial);
    assert_eq!(dashboard.orders.len(), 1);
    assert_eq!(dashboard.orders[0].id, mine.id);
    assert_eq!(dashboard.total_area, None);
}

#[tokio::test]
async fn design_dashboard_shows_accepted_orders_only() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let designer = app.seed_user("designer", Some(Department::Design)).await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    let accepted = app
        .services
        .orders
        .create_order(order_request(customer.id, manager.id))
        .await
        .expect("accepted order");
    let in_progress = app
        .services
        .orders
        .create_order(order_request(customer.id, manager.id))
        .await
        .expect("order to advance");
    app.services
        .orders
        .update_order_status(
            in_progress.id,
            UpdateOrderStatusRequest {
                status: OrderStatus::InProgress,
            },
        )
        .await
        .expect("advance status");

    let dashboard = app
        .services
        .dashboards
        .dashboard_for(designer.id, None)
        .await
        .expect("dashboard")
        .expect("design view");

    assert_eq!(dashboard.view, DashboardView::Design);
    assert_eq!(dashboard.orders.len(), 1);
    assert_eq!(dashboard.orders[0].id, accepted.id);
}

#[tokio::test]
async fn technical_dashboard_filters_by_week_and_sums_area() {
    let app = TestApp::new().await;
    let manager = app.seed_user("manager", Some(Department::Commercial)).await;
    let technologist = app
        .seed_user("technologist", Some(Department::Design))
        .await;
    let technical = app
        .seed_user("machinist", Some(Department::Technical))
        .await;
    let customer = app
        .seed_customer("Test Co", Some("TST"), Some(manager.id))
        .await;

    // Technical users see orders where they are the assigned technologist.
    let mut week_three = order_request(customer.id, manager.id);
    week_three.week = Some(3);
    let week_three = app
        .services
        .orders
        .create_order(week_three)
        .await
        .expect("week 3 order");
    assign_directly(&app.db, week_three.id, technical.id).await;
    app.services
        .orders
        .update_materials(
            week_three.id,
            MaterialsUpdate {
                total_area: Some(4.5),
                ..Default::default()
            },
        )
        .await
        .expect("set area");

    let mut week_four = order_request(customer.id, manager.id);
    week_four.week = Some(4);
    let week_four = app
        .services
        .orders
        .create_order(week_four)
        .await
        .expect("week 4 order");
    assign_directly(&app.db, week_four.id, technical.id).await;
    app.services
        .orders
        .update_materials(
            week_four.id,
            MaterialsUpdate {
                total_area: Some(2.0),
                ..Default::default()
            },
        )
        .await
        .expect("set area");

    // An order assigned to someone else must not leak in.
    let mut other = order_request(customer.id, manager.id);
    other.week = Some(3);
    other.technologist_id = Some(technologist.id);
    app.services
        .orders
        .create_order(other)
        .await
        .expect("order assigned to the design technologist");

    let all_weeks = app
        .services
        .dashboards
        .dashboard_for(technical.id, None)
        .await
        .expect("dashboard")
        .expect("technical view");
    assert_eq!(all_weeks.view, DashboardView::Technical);
    assert_eq!(all_weeks.orders.len(), 2);
    assert_eq!(all_weeks.total_area, Some(6.5));

    let one_week = app
        .services
        .dashboards
        .dashboard_for(technical.id, Some(3))
        .await
        .expect("dashboard")
        .expect("technical view");
    assert_eq!(one_week.orders.len(), 1);
    assert_eq!(one_week.orders[0].id, week_three.id);
    assert_eq!(one_week.total_area, Some(4.5));
}

#[tokio::test]
async fn other_departments_get_no_dashboard() {
    let app = TestApp::new().await;
    let storekeeper = app
        .seed_user("storekeeper", Some(Department::Supply))
        .await;
    let unassigned = app.seed_user("newcomer", None).await;

    let supply = app
        .services
        .dashboards
        .dashboard_for(storekeeper.id, None)
        .await
        .expect("lookup succeeds");
    assert!(supply.is_none());

    let none = app
        .services
        .dashboards
        .dashboard_for(unassigned.id, None)
        .await
        .expect("lookup succeeds");
    assert!(none.is_none());
}
