//! PostgreSQL adapter for EmailTemplateRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{EmailTemplate, EmailTemplateId};
use crate::domain::ports::EmailTemplateRepository;
use crate::entity::email_templates;
use crate::error::DomainError;

pub struct PostgresEmailTemplateRepository {
    db: DatabaseConnection,
}

impl PostgresEmailTemplateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<email_templates::Model> for EmailTemplate {
    fn from(m: email_templates::Model) -> Self {
        EmailTemplate {
            id: EmailTemplateId(m.id),
            template_key: m.template_key,
            subject: m.subject,
            body: m.body,
            created_by: m.created_by,
            updated_by: m.updated_by,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl EmailTemplateRepository for PostgresEmailTemplateRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<EmailTemplate>, DomainError> {
        let result = email_templates::Entity::find()
            .filter(email_templates::Column::TemplateKey.eq(key))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn upsert(
        &self,
        key: &str,
        subject: &str,
        body: &str,
        updated_by: &str,
    ) -> Result<EmailTemplate, DomainError> {
        let existing = email_templates::Entity::find()
            .filter(email_templates::Column::TemplateKey.eq(key))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let now = Utc::now().fixed_offset();

        let result = match existing {
            Some(model) => email_templates::ActiveModel {
                id: Set(model.id),
                subject: Set(subject.to_string()),
                body: Set(body.to_string()),
                updated_by: Set(Some(updated_by.to_string())),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?,
            None => email_templates::ActiveModel {
                id: Set(Uuid::new_v4()),
                template_key: Set(key.to_string()),
                subject: Set(subject.to_string()),
                body: Set(body.to_string()),
                created_by: Set(updated_by.to_string()),
                updated_by: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?,
        };

        Ok(result.into())
    }

    async fn list(&self) -> Result<Vec<EmailTemplate>, DomainError> {
        let result = email_templates::Entity::find()
            .order_by_asc(email_templates::Column::TemplateKey)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
