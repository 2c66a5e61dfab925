use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Company department a user belongs to. Stored as a string tag; the set is
/// closed, so membership checks are plain enum comparisons rather than joins.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Department {
    #[sea_orm(string_value = "commercial")]
    Commercial,
    #[sea_orm(string_value = "technical")]
    Technical,
    #[sea_orm(string_value = "design")]
    Design,
    #[sea_orm(string_value = "supply")]
    Supply,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub username: String,

    pub full_name: Option<String>,
    pub department: Option<Department>,
    pub created_at: DateTime<Utc>,
}

// Orders reference users twice (manager, technologist), so the navigations
// live on the order side.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
