//! PostgreSQL adapter for StaffRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::entities::{NewStaffUser, StaffId, StaffUser};
use crate::domain::ports::StaffRepository;
use crate::entity::staff_users;
use crate::error::DomainError;

pub struct PostgresStaffRepository {
    db: DatabaseConnection,
}

impl PostgresStaffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<staff_users::Model> for StaffUser {
    fn from(m: staff_users::Model) -> Self {
        StaffUser {
            id: StaffId(m.id),
            username: m.username,
            email: m.email,
            password_hash: m.password_hash,
            api_key_hash: m.api_key_hash,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl StaffRepository for PostgresStaffRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StaffUser>, DomainError> {
        let result = staff_users::Entity::find()
            .filter(staff_users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StaffUser>, DomainError> {
        let result = staff_users::Entity::find()
            .filter(staff_users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<StaffUser>, DomainError> {
        let result = staff_users::Entity::find()
            .filter(staff_users::Column::ApiKeyHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, staff: &NewStaffUser) -> Result<StaffUser, DomainError> {
        let result = staff_users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(staff.username.clone()),
            email: Set(staff.email.clone()),
            password_hash: Set(staff.password_hash.clone()),
            api_key_hash: Set(None),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn set_api_key_hash(
        &self,
        id: &StaffId,
        hash: Option<String>,
    ) -> Result<(), DomainError> {
        staff_users::ActiveModel {
            id: Set(id.0),
            api_key_hash: Set(hash),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn set_password_hash(&self, id: &StaffId, hash: &str) -> Result<(), DomainError> {
        staff_users::ActiveModel {
            id: Set(id.0),
            password_hash: Set(hash.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}
