//! PostgreSQL adapter for ContentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::{Content, NAVBAR_COMPONENT, NAVBAR_NAME, NAVBAR_PAGE};
use crate::domain::ports::ContentRepository;
use crate::entity::contents;
use crate::error::DomainError;

pub struct PostgresContentRepository {
    db: DatabaseConnection,
}

impl PostgresContentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_navbar_model(&self) -> Result<Option<contents::Model>, DomainError> {
        contents::Entity::find()
            .filter(contents::Column::Page.eq(NAVBAR_PAGE))
            .filter(contents::Column::Component.eq(NAVBAR_COMPONENT))
            .filter(contents::Column::Name.eq(NAVBAR_NAME))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

impl From<contents::Model> for Content {
    fn from(m: contents::Model) -> Self {
        Content {
            id: m.id,
            page: m.page,
            component: m.component,
            name: m.name,
            hierarchical_json: m.hierarchical_json,
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn find_navbar(&self) -> Result<Option<Content>, DomainError> {
        Ok(self.find_navbar_model().await?.map(Into::into))
    }

    async fn upsert_navbar(
        &self,
        json: &Value,
        updated_by: &str,
    ) -> Result<Content, DomainError> {
        let existing = self.find_navbar_model().await?;
        let now = Utc::now().fixed_offset();

        let result = match existing {
            Some(model) => contents::ActiveModel {
                id: Set(model.id),
                hierarchical_json: Set(Some(json.clone())),
                updated_by: Set(Some(updated_by.to_string())),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?,
            None => contents::ActiveModel {
                id: Set(Uuid::new_v4()),
                page: Set(NAVBAR_PAGE.to_string()),
                component: Set(NAVBAR_COMPONENT.to_string()),
                name: Set(NAVBAR_NAME.to_string()),
                hierarchical_json: Set(Some(json.clone())),
                updated_by: Set(Some(updated_by.to_string())),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?,
        };

        Ok(result.into())
    }
}
