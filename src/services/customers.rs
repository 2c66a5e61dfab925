use crate::{
    db::DbPool,
    entities::{
        customer::{self, ActiveModel as CustomerActiveModel, Entity as CustomerEntity},
        user::Entity as UserEntity,
    },
    errors::{is_unique_violation, ServiceError, ValidationFailures},
    events::{Event, EventSender},
    services::order_rules,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    /// Short code embedded in order numbers; unique across customers.
    #[validate(length(min = 1, max = 10, message = "Code must be between 1 and 10 characters"))]
    pub code: Option<String>,
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub city: Option<String>,
    pub code: Option<String>,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<customer::Model> for CustomerResponse {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            city: model.city,
            code: model.code,
            manager_id: model.manager_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DbPool>,
    events: EventSender,
}

impl CustomerService {
    pub fn new(db: Arc<DbPool>, events: EventSender) -> Self {
        Self { db, events }
    }

    #[instrument(skip(self, request))]
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        let mut failures = match request.validate() {
            Ok(()) => ValidationFailures::new(),
            Err(errors) => errors.into(),
        };

        if let Some(manager_id) = request.manager_id {
            let manager = self.load_manager(manager_id).await?;
            order_rules::check_manager(manager.department, &mut failures);
        }
        failures.into_result()?;

        let customer = CustomerActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            city: Set(request.city),
            code: Set(request.code),
            manager_id: Set(request.manager_id),
            created_at: Set(Utc::now()),
        };

        let model = customer.insert(&*self.db).await.map_err(|err| {
            if is_unique_violation(&err) {
                ServiceError::Conflict("Customer code already in use".to_string())
            } else {
                err.into()
            }
        })?;

        info!(customer_id = %model.id, "customer created");
        self.events.send(Event::CustomerCreated(model.id)).await;
        Ok(model.into())
    }

    pub async fn get_customer(&self, customer_id: Uuid) -> Result<CustomerResponse, ServiceError> {
        CustomerEntity::find_by_id(customer_id)
            .one(&*self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", customer_id)))
    }

    pub async fn list_customers(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<CustomerListResponse, ServiceError> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);

        let paginator = CustomerEntity::find()
            .order_by_asc(customer::Column::Code)
            .paginate(&*self.db, per_page);
        let total = paginator.num_items().await?;
        let customers = paginator.fetch_page(page - 1).await?;

        Ok(CustomerListResponse {
            customers: customers.into_iter().map(Into::into).collect(),
            total,
            page,
            per_page,
        })
    }

    /// Updates name, city and manager. The short code is intentionally not
    /// editable here; existing order numbers embed it.
    #[instrument(skip(self, request))]
    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        request: UpdateCustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        let existing = CustomerEntity::find_by_id(customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer {} not found", customer_id))
            })?;

        if let Some(manager_id) = request.manager_id {
            let manager = self.load_manager(manager_id).await?;
            let mut failures = ValidationFailures::new();
            order_rules::check_manager(manager.department, &mut failures);
            failures.into_result()?;
        }

        let mut active = existing.into_active_model();
        if let Some(name) = request.name {
            active.name = Set(Some(name));
        }
        if let Some(city) = request.city {
            active.city = Set(Some(city));
        }
        if let Some(manager_id) = request.manager_id {
            active.manager_id = Set(Some(manager_id));
        }

        let updated = active.update(&*self.db).await?;
        Ok(updated.into())
    }

    async fn load_manager(
        &self,
        manager_id: Uuid,
    ) -> Result<crate::entities::user::Model, ServiceError> {
        UserEntity::find_by_id(manager_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", manager_id)))
    }
}
