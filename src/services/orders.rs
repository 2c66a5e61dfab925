use crate::{
    db::DbPool,
    entities::{
        customer::Entity as CustomerEntity,
        order::{
            self, ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel,
            OrderStatus, OrderType, SubOrderType,
        },
        order_comment::{self, Entity as OrderCommentEntity},
        order_file::{self, Entity as OrderFileEntity},
        order_sequence::{self, Entity as OrderSequenceEntity},
        user::{self, Entity as UserEntity},
    },
    errors::{is_unique_violation, ServiceError, ValidationFailures},
    events::{Event, EventSender},
    services::{order_numbers, order_rules},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Allocation retries when the unique-index backstop fires under a race.
const MAX_ALLOCATION_ATTEMPTS: u32 = 3;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    /// The commercial user submitting the order.
    pub manager_id: Uuid,
    pub order_type: Option<OrderType>,
    pub sub_order_type: Option<SubOrderType>,
    pub parent_order_id: Option<Uuid>,
    pub part: Option<i32>,
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,
    pub week: Option<i32>,
    pub technologist_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignTechnologistRequest {
    pub technologist_id: Uuid,
}

/// Material flags, areas, edge-banding lengths and packing data. Every field
/// is optional; only the supplied ones are written.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct MaterialsUpdate {
    pub mdf: Option<bool>,
    pub fittings: Option<bool>,
    pub glass: Option<bool>,
    pub cnc: Option<bool>,
    pub ldsp_area: Option<f64>,
    pub mdf_area: Option<f64>,
    pub edge_04: Option<f64>,
    pub edge_1: Option<f64>,
    pub edge_2: Option<f64>,
    pub total_area: Option<f64>,
    pub serial_area: Option<f64>,
    pub portal_area: Option<f64>,
    pub weight: Option<f64>,
    pub package_count: Option<i32>,
    pub complaint_reason: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddCommentRequest {
    pub author_id: Uuid,
    #[validate(length(min = 1, message = "Comment body must not be empty"))]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AttachFileRequest {
    #[validate(length(min = 1, message = "File name must not be empty"))]
    pub file_name: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub order_number: String,
    pub month: i32,
    pub year: i32,
    pub week: Option<i32>,
    pub order_type: Option<OrderType>,
    pub sub_order_type: Option<SubOrderType>,
    pub parent_order_id: Option<Uuid>,
    pub part: Option<i32>,
    pub manager_id: Uuid,
    pub technologist_id: Option<Uuid>,
    pub status: OrderStatus,
    pub mdf: bool,
    pub fittings: bool,
    pub glass: bool,
    pub cnc: bool,
    pub ldsp_area: Option<f64>,
    pub mdf_area: Option<f64>,
    pub edge_04: Option<f64>,
    pub edge_1: Option<f64>,
    pub edge_2: Option<f64>,
    pub total_area: Option<f64>,
    pub serial_area: Option<f64>,
    pub portal_area: Option<f64>,
    pub weight: Option<f64>,
    pub package_count: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub complaint_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<OrderModel> for OrderResponse {
    fn from(model: OrderModel) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            order_number: model.order_number,
            month: model.month,
            year: model.year,
            week: model.week,
            order_type: model.order_type,
            sub_order_type: model.sub_order_type,
            parent_order_id: model.parent_order_id,
            part: model.part,
            manager_id: model.manager_id,
            technologist_id: model.technologist_id,
            status: model.status,
            mdf: model.mdf,
            fittings: model.fittings,
            glass: model.glass,
            cnc: model.cnc,
            ldsp_area: model.ldsp_area,
            mdf_area: model.mdf_area,
            edge_04: model.edge_04,
            edge_1: model.edge_1,
            edge_2: model.edge_2,
            total_area: model.total_area,
            serial_area: model.serial_area,
            portal_area: model.portal_area,
            weight: model.weight,
            package_count: model.package_count,
            start_date: model.start_date,
            complaint_reason: model.complaint_reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Service for order creation (number allocation included), lifecycle updates
/// and child records.
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DbPool>,
    events: EventSender,
}

impl OrderService {
    pub fn new(db: Arc<DbPool>, events: EventSender) -> Self {
        Self { db, events }
    }

    /// Creates an order, allocating its number inside the insert transaction.
    ///
    /// The number is computed exactly once here and never recomputed. For a
    /// primary order the per-(customer, year) counter row is advanced in the
    /// same transaction, and the unique index on `order_number` is the
    /// backstop against races: a violation rolls the attempt back and
    /// recomputes from fresh state. A sub-order allocates nothing and derives
    /// its number from the parent's.
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        let mut failures = match request.validate() {
            Ok(()) => ValidationFailures::new(),
            Err(errors) => errors.into(),
        };

        let db = &*self.db;

        let customer = CustomerEntity::find_by_id(request.customer_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer {} not found", request.customer_id))
            })?;

        let manager = self.load_user(request.manager_id).await?;
        order_rules::check_manager(manager.department, &mut failures);

        if let Some(technologist_id) = request.technologist_id {
            let technologist = self.load_user(technologist_id).await?;
            order_rules::check_technologist(technologist.department, &mut failures);
        }

        let parent = match request.parent_order_id {
            Some(parent_id) => Some(
                OrderEntity::find_by_id(parent_id)
                    .one(db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Parent order {} not found", parent_id))
                    })?,
            ),
            None => None,
        };

        // Sub-orders may omit the type and inherit it from the parent.
        let effective_type = request
            .order_type
            .or_else(|| parent.as_ref().and_then(|p| p.order_type));

        order_rules::check_order_draft(
            &order_rules::OrderDraft {
                effective_order_type: effective_type,
                sub_order_type: request.sub_order_type,
                has_parent: parent.is_some(),
                has_part: request.part.is_some(),
                week: request.week,
            },
            &mut failures,
        );

        let customer_code = match customer.code.as_deref() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => {
                failures.add("customer_id", order_rules::CUSTOMER_CODE_REQUIRED);
                String::new()
            }
        };

        failures.into_result()?;

        let year = Utc::now().year();

        // A sub-order keeps its parent's sequence: the number is the parent's
        // number plus the qualifier suffix, and the counter is untouched. The
        // unique index still rejects a duplicate sub-order of the same type,
        // and recomputing could not produce a different number, so there is
        // no retry here.
        if let (Some(sub), Some(parent)) = (request.sub_order_type, parent.as_ref()) {
            let order_number = order_numbers::sub_order_number(&parent.order_number, sub);
            let order = Self::order_to_insert(&request, effective_type, order_number.clone(), year);
            return match order.insert(db).await {
                Ok(model) => Ok(self.created(model).await),
                Err(err) if is_unique_violation(&err) => Err(ServiceError::Conflict(format!(
                    "Order {} already exists",
                    order_number
                ))),
                Err(err) => Err(err.into()),
            };
        }

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let txn = db.begin().await?;

            let sequence_row = OrderSequenceEntity::find_by_id((customer.id, year))
                .one(&txn)
                .await?;
            let last_seq = match &sequence_row {
                Some(row) => row.last_seq,
                // First allocation for this customer/year: seed the counter
                // from whatever numbers already exist (pre-counter data).
                None => {
                    let existing = OrderEntity::find()
                        .filter(order::Column::CustomerId.eq(customer.id))
                        .filter(order::Column::Year.eq(year))
                        .all(&txn)
                        .await?;
                    order_numbers::max_sequence(
                        existing.iter().map(|o| o.order_number.as_str()),
                        &customer_code,
                        year,
                    ) as i32
                }
            };
            let next_seq = last_seq + 1;

            match sequence_row {
                Some(row) => {
                    let mut counter = row.into_active_model();
                    counter.last_seq = Set(next_seq);
                    counter.update(&txn).await?;
                }
                // Two first allocations can race to create the counter row;
                // the loser's key violation re-enters the retry loop instead
                // of surfacing as a storage failure.
                None => {
                    let seeded = order_sequence::ActiveModel {
                        customer_id: Set(customer.id),
                        year: Set(year),
                        last_seq: Set(next_seq),
                    }
                    .insert(&txn)
                    .await;
                    match seeded {
                        Ok(_) => {}
                        Err(err) if is_unique_violation(&err) => {
                            txn.rollback().await?;
                            warn!(attempt, "sequence counter seeded concurrently, retrying");
                            continue;
                        }
                        Err(err) => {
                            txn.rollback().await?;
                            return Err(err.into());
                        }
                    }
                }
            }

            let order_number = order_numbers::compose_order_number(
                &customer_code,
                year,
                next_seq as u32,
                effective_type,
                request.part,
            );

            let order = Self::order_to_insert(&request, effective_type, order_number.clone(), year);

            match order.insert(&txn).await {
                Ok(model) => {
                    txn.commit().await?;
                    return Ok(self.created(model).await);
                }
                Err(err) if is_unique_violation(&err) => {
                    txn.rollback().await?;
                    warn!(
                        %order_number,
                        attempt,
                        "order number collision, recomputing"
                    );
                }
                Err(err) => {
                    txn.rollback().await?;
                    return Err(err.into());
                }
            }
        }

        Err(ServiceError::Conflict(format!(
            "Could not allocate an order number for customer {} after {} attempts",
            customer_code, MAX_ALLOCATION_ATTEMPTS
        )))
    }

    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderResponse, ServiceError> {
        self.load_order(order_id).await.map(Into::into)
    }

    pub async fn get_order_by_number(
        &self,
        order_number: &str,
    ) -> Result<OrderResponse, ServiceError> {
        OrderEntity::find()
            .filter(order::Column::OrderNumber.eq(order_number))
            .one(&*self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_number)))
    }

    pub async fn list_orders(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<OrderListResponse, ServiceError> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);

        let paginator = OrderEntity::find()
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&*self.db, per_page);
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page - 1).await?;

        Ok(OrderListResponse {
            orders: orders.into_iter().map(Into::into).collect(),
            total,
            page,
            per_page,
        })
    }

    /// Status transitions never touch the generated order number.
    #[instrument(skip(self, request))]
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        request: UpdateOrderStatusRequest,
    ) -> Result<OrderResponse, ServiceError> {
        let existing = self.load_order(order_id).await?;
        let old_status = existing.status;

        let mut active = existing.into_active_model();
        active.status = Set(request.status);
        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(&*self.db).await?;

        self.events
            .send(Event::OrderStatusChanged {
                order_id,
                old_status: format!("{:?}", old_status),
                new_status: format!("{:?}", updated.status),
            })
            .await;
        Ok(updated.into())
    }

    #[instrument(skip(self, request))]
    pub async fn assign_technologist(
        &self,
        order_id: Uuid,
        request: AssignTechnologistRequest,
    ) -> Result<OrderResponse, ServiceError> {
        let existing = self.load_order(order_id).await?;
        let technologist = self.load_user(request.technologist_id).await?;

        let mut failures = ValidationFailures::new();
        order_rules::check_technologist(technologist.department, &mut failures);
        failures.into_result()?;

        let mut active = existing.into_active_model();
        active.technologist_id = Set(Some(technologist.id));
        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(&*self.db).await?;

        self.events
            .send(Event::OrderAssigned {
                order_id,
                technologist_id: technologist.id,
            })
            .await;
        Ok(updated.into())
    }

    /// Applies the supplied material fields; absent fields stay untouched and
    /// the order number is never recomputed.
    #[instrument(skip(self, update))]
    pub async fn update_materials(
        &self,
        order_id: Uuid,
        update: MaterialsUpdate,
    ) -> Result<OrderResponse, ServiceError> {
        let existing = self.load_order(order_id).await?;
        let mut active = existing.into_active_model();

        if let Some(mdf) = update.mdf {
            active.mdf = Set(mdf);
        }
        if let Some(fittings) = update.fittings {
            active.fittings = Set(fittings);
        }
        if let Some(glass) = update.glass {
            active.glass = Set(glass);
        }
        if let Some(cnc) = update.cnc {
            active.cnc = Set(cnc);
        }
        if let Some(ldsp_area) = update.ldsp_area {
            active.ldsp_area = Set(Some(ldsp_area));
        }
        if let Some(mdf_area) = update.mdf_area {
            active.mdf_area = Set(Some(mdf_area));
        }
        if let Some(edge_04) = update.edge_04 {
            active.edge_04 = Set(Some(edge_04));
        }
        if let Some(edge_1) = update.edge_1 {
            active.edge_1 = Set(Some(edge_1));
        }
        if let Some(edge_2) = update.edge_2 {
            active.edge_2 = Set(Some(edge_2));
        }
        if let Some(total_area) = update.total_area {
            active.total_area = Set(Some(total_area));
        }
        if let Some(serial_area) = update.serial_area {
            active.serial_area = Set(Some(serial_area));
        }
        if let Some(portal_area) = update.portal_area {
            active.portal_area = Set(Some(portal_area));
        }
        if let Some(weight) = update.weight {
            active.weight = Set(Some(weight));
        }
        if let Some(package_count) = update.package_count {
            active.package_count = Set(Some(package_count));
        }
        if let Some(complaint_reason) = update.complaint_reason {
            active.complaint_reason = Set(Some(complaint_reason));
        }
        active.updated_at = Set(Some(Utc::now()));

        let updated = active.update(&*self.db).await?;
        Ok(updated.into())
    }

    /// Deletes the order; files and comments go with it via FK cascade.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: Uuid) -> Result<(), ServiceError> {
        let existing = self.load_order(order_id).await?;
        existing.delete(&*self.db).await?;
        self.events.send(Event::OrderDeleted(order_id)).await;
        Ok(())
    }

    pub async fn add_comment(
        &self,
        order_id: Uuid,
        request: AddCommentRequest,
    ) -> Result<order_comment::Model, ServiceError> {
        request.validate().map_err(ServiceError::from)?;
        self.load_order(order_id).await?;
        self.load_user(request.author_id).await?;

        let comment = order_comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            author_id: Set(request.author_id),
            body: Set(request.body),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await?;

        self.events
            .send(Event::OrderCommentAdded {
                order_id,
                comment_id: comment.id,
            })
            .await;
        Ok(comment)
    }

    pub async fn list_comments(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<order_comment::Model>, ServiceError> {
        self.load_order(order_id).await?;
        Ok(OrderCommentEntity::find()
            .filter(order_comment::Column::OrderId.eq(order_id))
            .order_by_asc(order_comment::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    pub async fn attach_file(
        &self,
        order_id: Uuid,
        request: AttachFileRequest,
    ) -> Result<order_file::Model, ServiceError> {
        request.validate().map_err(ServiceError::from)?;
        self.load_order(order_id).await?;

        let file = order_file::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            file_name: Set(request.file_name),
            content_type: Set(request.content_type),
            uploaded_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await?;

        self.events
            .send(Event::OrderFileAttached {
                order_id,
                file_id: file.id,
            })
            .await;
        Ok(file)
    }

    pub async fn list_files(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<order_file::Model>, ServiceError> {
        self.load_order(order_id).await?;
        Ok(OrderFileEntity::find()
            .filter(order_file::Column::OrderId.eq(order_id))
            .order_by_asc(order_file::Column::UploadedAt)
            .all(&*self.db)
            .await?)
    }

    fn order_to_insert(
        request: &CreateOrderRequest,
        effective_type: Option<OrderType>,
        order_number: String,
        year: i32,
    ) -> OrderActiveModel {
        OrderActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(request.customer_id),
            order_number: Set(order_number),
            month: Set(request.month),
            year: Set(year),
            week: Set(request.week),
            order_type: Set(effective_type),
            sub_order_type: Set(request.sub_order_type),
            parent_order_id: Set(request.parent_order_id),
            part: Set(request.part),
            manager_id: Set(request.manager_id),
            technologist_id: Set(request.technologist_id),
            status: Set(OrderStatus::Accepted),
            mdf: Set(false),
            fittings: Set(false),
            glass: Set(false),
            cnc: Set(false),
            ldsp_area: Set(None),
            mdf_area: Set(None),
            edge_04: Set(None),
            edge_1: Set(None),
            edge_2: Set(None),
            total_area: Set(None),
            serial_area: Set(None),
            portal_area: Set(None),
            weight: Set(None),
            package_count: Set(None),
            start_date: Set(request.start_date),
            complaint_reason: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
    }

    async fn created(&self, model: OrderModel) -> OrderResponse {
        info!(order_number = %model.order_number, "order created");
        self.events
            .send(Event::OrderCreated {
                order_id: model.id,
                order_number: model.order_number.clone(),
            })
            .await;
        model.into()
    }

    async fn load_order(&self, order_id: Uuid) -> Result<OrderModel, ServiceError> {
        OrderEntity::find_by_id(order_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))
    }

    async fn load_user(&self, user_id: Uuid) -> Result<user::Model, ServiceError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))
    }
}
