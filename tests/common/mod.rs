#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use axum::Router;
use joinery_api::{
    config::AppConfig,
    db::{self, DbConfig},
    entities::{customer, user, user::Department},
    events,
    handlers::AppServices,
    services::orders::CreateOrderRequest,
    AppState,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

/// In-memory SQLite harness: fresh schema per test, services wired to a
/// drained event channel.
pub struct TestApp {
    pub db: Arc<DatabaseConnection>,
    pub services: AppServices,
}

impl TestApp {
    pub async fn new() -> Self {
        // A single connection keeps every query on the same in-memory
        // database.
        let pool = db::establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        })
        .await
        .expect("connect to sqlite");
        db::run_migrations(&pool).await.expect("run migrations");

        let db = Arc::new(pool);
        let (sender, receiver) = events::channel(64);
        tokio::spawn(events::process_events(receiver));

        let services = AppServices::new(db.clone(), sender);
        Self { db, services }
    }

    /// Full HTTP router over the same database and services.
    pub fn router(&self) -> Router {
        let state = AppState {
            db: self.db.clone(),
            config: AppConfig::new(
                "sqlite::memory:".to_string(),
                "127.0.0.1".to_string(),
                0,
                "test".to_string(),
            ),
            services: self.services.clone(),
        };
        joinery_api::app_router(state)
    }

    pub async fn seed_user(
        &self,
        username: &str,
        department: Option<Department>,
    ) -> user::Model {
        user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            full_name: Set(None),
            department: Set(department),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await
        .expect("seed user")
    }

    pub async fn seed_customer(
        &self,
        name: &str,
        code: Option<&str>,
        manager_id: Option<Uuid>,
    ) -> customer::Model {
        customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(Some(name.to_string())),
            city: Set(None),
            code: Set(code.map(str::to_string)),
            manager_id: Set(manager_id),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await
        .expect("seed customer")
    }
}

/// Minimal valid creation request; tests override the fields under scrutiny.
pub fn order_request(customer_id: Uuid, manager_id: Uuid) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id,
        manager_id,
        order_type: Some(joinery_api::entities::order::OrderType::CustomItems),
        sub_order_type: None,
        parent_order_id: None,
        part: None,
        month: 10,
        week: Some(4),
        technologist_id: None,
        start_date: None,
    }
}

/// Two-digit suffix of the current year, as embedded in allocated numbers.
pub fn current_yy() -> String {
    use chrono::Datelike;
    format!("{:02}", Utc::now().year().rem_euclid(100))
}
