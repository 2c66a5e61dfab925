use crate::{
    db::DbPool,
    entities::user::{self, ActiveModel as UserActiveModel, Entity as UserEntity, Department},
    errors::{is_unique_violation, ServiceError},
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 150, message = "Username must not be empty"))]
    pub username: String,
    pub full_name: Option<String>,
    pub department: Option<Department>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub department: Option<Department>,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            full_name: model.full_name,
            department: model.department,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    db: Arc<DbPool>,
}

impl UserService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<UserResponse, ServiceError> {
        request.validate().map_err(ServiceError::from)?;

        let user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(request.username),
            full_name: Set(request.full_name),
            department: Set(request.department),
            created_at: Set(Utc::now()),
        };

        let model = user.insert(&*self.db).await.map_err(|err| {
            if is_unique_violation(&err) {
                ServiceError::Conflict("Username already taken".to_string())
            } else {
                err.into()
            }
        })?;
        Ok(model.into())
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<UserResponse, ServiceError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))
    }
}
