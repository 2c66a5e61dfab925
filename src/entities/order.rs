use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product line of an order. The string values are the Cyrillic code letters
/// that appear verbatim inside generated order numbers.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum OrderType {
    /// Custom (non-standard) items.
    #[sea_orm(string_value = "Н")]
    #[serde(rename = "Н")]
    CustomItems,
    /// Custom kitchen.
    #[sea_orm(string_value = "К")]
    #[serde(rename = "К")]
    CustomKitchen,
    /// Standard kitchen.
    #[sea_orm(string_value = "ЛК")]
    #[serde(rename = "ЛК")]
    StandardKitchen,
    /// Standard cabinet.
    #[sea_orm(string_value = "ЭШ")]
    #[serde(rename = "ЭШ")]
    StandardCabinet,
    /// Fireplace portal.
    #[sea_orm(string_value = "П")]
    #[serde(rename = "П")]
    Portal,
}

impl OrderType {
    /// Code letters appended right after the sequence digits.
    pub fn code(&self) -> &'static str {
        match self {
            OrderType::CustomItems => "Н",
            OrderType::CustomKitchen => "К",
            OrderType::StandardKitchen => "ЛК",
            OrderType::StandardCabinet => "ЭШ",
            OrderType::Portal => "П",
        }
    }
}

/// Qualifier marking an order as derived from a parent order.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum SubOrderType {
    /// Supplement to an existing order.
    #[sea_orm(string_value = "ДОП")]
    #[serde(rename = "ДОП")]
    Supplement,
    /// Warranty claim against an existing order.
    #[sea_orm(string_value = "РЕК")]
    #[serde(rename = "РЕК")]
    Claim,
    /// Rework of an existing order.
    #[sea_orm(string_value = "ДОД")]
    #[serde(rename = "ДОД")]
    Rework,
}

impl SubOrderType {
    /// Suffix appended to the parent-derived order number.
    pub fn code(&self) -> &'static str {
        match self {
            SubOrderType::Supplement => "ДОП",
            SubOrderType::Claim => "РЕК",
            SubOrderType::Rework => "ДОД",
        }
    }
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "clarification")]
    Clarification,
    #[sea_orm(string_value = "documents")]
    Documents,
    #[sea_orm(string_value = "postponed")]
    Postponed,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub customer_id: Uuid,

    /// Generated at creation, frozen afterwards. Format:
    /// `{CODE}-{YY}-{SEQ:03}{TYPE}[-{SUBTYPE}|-{PART}]`.
    #[sea_orm(unique)]
    pub order_number: String,

    pub month: i32,
    pub year: i32,
    /// Production week within the month, 1 through 5.
    pub week: Option<i32>,

    pub order_type: Option<OrderType>,
    pub sub_order_type: Option<SubOrderType>,
    pub parent_order_id: Option<Uuid>,
    /// Optional sub-sequence when an order ships in parts.
    pub part: Option<i32>,

    pub manager_id: Uuid,
    pub technologist_id: Option<Uuid>,
    pub status: OrderStatus,

    // Material flags
    pub mdf: bool,
    pub fittings: bool,
    pub glass: bool,
    pub cnc: bool,

    // Areas (m²) and edge-banding lengths (running meters)
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ManagerId",
        to = "super::user::Column::Id"
    )]
    Manager,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TechnologistId",
        to = "super::user::Column::Id"
    )]
    Technologist,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentOrderId",
        to = "Column::Id"
    )]
    ParentOrder,
    #[sea_orm(has_many = "super::order_file::Entity")]
    Files,
    #[sea_orm(has_many = "super::order_comment::Entity")]
    Comments,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl Related<super::order_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
