//! PostgreSQL adapters for the published-content repositories

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::domain::entities::{BlogPost, Deal, NewBlogPost, NewDeal, NewPolicy, Policy, UpdatePolicy};
use crate::domain::ports::{BlogRepository, DealRepository, PolicyRepository};
use crate::entity::{blog_posts, deals, policies};
use crate::error::DomainError;

pub struct PostgresBlogRepository {
    db: DatabaseConnection,
}

impl PostgresBlogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn tags_from_json(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|tags| {
            tags.iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

impl From<blog_posts::Model> for BlogPost {
    fn from(m: blog_posts::Model) -> Self {
        BlogPost {
            id: m.id,
            title: m.title,
            content: m.content,
            image: m.image,
            author: m.author,
            tags: tags_from_json(&m.tags),
            is_approved: m.is_approved,
            is_newsletter: m.is_newsletter,
            date_posted: m.date_posted.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn create(&self, post: &NewBlogPost, author: &str) -> Result<BlogPost, DomainError> {
        let result = blog_posts::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            image: Set(post.image.clone()),
            author: Set(author.to_string()),
            tags: Set(serde_json::json!(post.tags)),
            is_approved: Set(false),
            is_newsletter: Set(post.is_newsletter),
            date_posted: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn approve(&self, id: &Uuid) -> Result<Option<BlogPost>, DomainError> {
        let existing = blog_posts::Entity::find_by_id(*id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let updated = blog_posts::ActiveModel {
            id: Set(model.id),
            is_approved: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(updated.into()))
    }

    async fn find_approved(&self, id: &Uuid) -> Result<Option<BlogPost>, DomainError> {
        let result = blog_posts::Entity::find_by_id(*id)
            .filter(blog_posts::Column::IsApproved.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list_approved(&self) -> Result<Vec<BlogPost>, DomainError> {
        let result = blog_posts::Entity::find()
            .filter(blog_posts::Column::IsApproved.eq(true))
            .order_by_desc(blog_posts::Column::DatePosted)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

pub struct PostgresPolicyRepository {
    db: DatabaseConnection,
}

impl PostgresPolicyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<policies::Model> for Policy {
    fn from(m: policies::Model) -> Self {
        Policy {
            id: m.id,
            title: m.title,
            content: m.content,
            is_active: m.is_active,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl PolicyRepository for PostgresPolicyRepository {
    async fn create(&self, policy: &NewPolicy) -> Result<Policy, DomainError> {
        let result = policies::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(policy.title.clone()),
            content: Set(policy.content.clone()),
            is_active: Set(policy.is_active),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, id: &Uuid, changes: &UpdatePolicy) -> Result<Policy, DomainError> {
        let existing = policies::Entity::find_by_id(*id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound("Policy not found.".to_string()))?;

        let mut model: policies::ActiveModel = existing.into();
        if let Some(title) = &changes.title {
            model.title = Set(title.clone());
        }
        if let Some(content) = &changes.content {
            model.content = Set(content.clone());
        }
        if let Some(is_active) = changes.is_active {
            model.is_active = Set(is_active);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(updated.into())
    }

    async fn list_active(&self) -> Result<Vec<Policy>, DomainError> {
        let result = policies::Entity::find()
            .filter(policies::Column::IsActive.eq(true))
            .order_by_asc(policies::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

pub struct PostgresDealRepository {
    db: DatabaseConnection,
}

impl PostgresDealRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<deals::Model> for Deal {
    fn from(m: deals::Model) -> Self {
        Deal {
            id: m.id,
            name: m.name,
            price: m.price,
            discounted_price: m.discounted_price,
            included_items: tags_from_json(&m.included_items),
            is_active: m.is_active,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl DealRepository for PostgresDealRepository {
    async fn create(&self, deal: &NewDeal) -> Result<Deal, DomainError> {
        // The unique index on name decides duplicates, not a pre-read
        let result = deals::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(deal.name.clone()),
            price: Set(deal.price),
            discounted_price: Set(deal.discounted_price),
            included_items: Set(serde_json::json!(deal.included_items)),
            is_active: Set(deal.is_active),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::AlreadyExists("Deal with this name already exists.".to_string())
            }
            _ => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn list_active(&self) -> Result<Vec<Deal>, DomainError> {
        let result = deals::Entity::find()
            .filter(deals::Column::IsActive.eq(true))
            .order_by_asc(deals::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Deal>, DomainError> {
        let result = deals::Entity::find()
            .order_by_asc(deals::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = deals::Entity::delete_by_id(*id)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
