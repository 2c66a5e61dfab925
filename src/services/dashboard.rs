use crate::{
    db::DbPool,
    entities::{
        order::{self, Entity as OrderEntity, OrderStatus},
        user::{Department, Entity as UserEntity},
    },
    errors::ServiceError,
    services::orders::OrderResponse,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::sync::Arc;
use strum::Display;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// Which dashboard the presentation layer should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DashboardView {
    Commercial,
    Design,
    Technical,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub view: DashboardView,
    pub orders: Vec<OrderResponse>,
    /// Summed order area, shown on the technical dashboard only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_area: Option<f64>,
}

/// Routes an actor to the order list their department works from.
#[derive(Clone)]
pub struct DashboardService {
    db: Arc<DbPool>,
}

impl DashboardService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Department policy: commercial sees the orders the actor manages,
    /// design sees all accepted orders awaiting assignment, technical sees
    /// orders assigned to the actor as technologist, optionally narrowed to
    /// one production week. Any other (or missing) department gets `None`,
    /// which the HTTP layer turns into a redirect to the login view.
    #[instrument(skip(self))]
    pub async fn dashboard_for(
        &self,
        user_id: Uuid,
        week: Option<i32>,
    ) -> Result<Option<DashboardResponse>, ServiceError> {
        let user = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;

        let (view, query) = match user.department {
            Some(Department::Commercial) => (
                DashboardView::Commercial,
                OrderEntity::find().filter(order::Column::ManagerId.eq(user.id)),
            ),
            Some(Department::Design) => (
                DashboardView::Design,
                OrderEntity::find().filter(order::Column::Status.eq(OrderStatus::Accepted)),
            ),
            Some(Department::Technical) => {
                let mut query =
                    OrderEntity::find().filter(order::Column::TechnologistId.eq(user.id));
                if let Some(week) = week {
                    query = query.filter(order::Column::Week.eq(week));
                }
                (DashboardView::Technical, query)
            }
            _ => return Ok(None),
        };

        let orders = query
            .order_by_desc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        let total_area = match view {
            DashboardView::Technical => Some(
                orders
                    .iter()
                    .filter_map(|order| order.total_area)
                    .sum::<f64>(),
            ),
            _ => None,
        };

        Ok(Some(DashboardResponse {
            view,
            orders: orders.into_iter().map(Into::into).collect(),
            total_area,
        }))
    }
}
