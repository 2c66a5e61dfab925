pub mod customers;
pub mod health;
pub mod orders;
pub mod users;

use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub orders: Arc<crate::services::orders::OrderService>,
    pub customers: Arc<crate::services::customers::CustomerService>,
    pub users: Arc<crate::services::users::UserService>,
    pub dashboards: Arc<crate::services::dashboard::DashboardService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, events: EventSender) -> Self {
        Self {
            orders: Arc::new(crate::services::orders::OrderService::new(
                db.clone(),
                events.clone(),
            )),
            customers: Arc::new(crate::services::customers::CustomerService::new(
                db.clone(),
                events,
            )),
            users: Arc::new(crate::services::users::UserService::new(db.clone())),
            dashboards: Arc::new(crate::services::dashboard::DashboardService::new(db)),
        }
    }
}
