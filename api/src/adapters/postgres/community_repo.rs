//! PostgreSQL adapters for the community-facing repositories

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::domain::entities::{
    ContactMessage, JobApplication, NewContactMessage, NewJobApplication, NewTestimonial,
    NewsletterSubscriber, Reply, Testimonial,
};
use crate::domain::ports::{
    ContactRepository, JobApplicationRepository, NewsletterRepository, TestimonialRepository,
};
use crate::entity::{contact_messages, job_applications, newsletter_subscribers, replies, testimonials};
use crate::error::DomainError;

pub struct PostgresTestimonialRepository {
    db: DatabaseConnection,
}

impl PostgresTestimonialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<testimonials::Model> for Testimonial {
    fn from(m: testimonials::Model) -> Self {
        Testimonial {
            id: m.id,
            name: m.name,
            email: m.email,
            location: m.location,
            message: m.message,
            is_approved: m.is_approved,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl TestimonialRepository for PostgresTestimonialRepository {
    async fn create(&self, testimonial: &NewTestimonial) -> Result<Testimonial, DomainError> {
        let result = testimonials::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(testimonial.name.clone()),
            email: Set(testimonial.email.clone()),
            location: Set(testimonial.location.clone()),
            message: Set(testimonial.message.clone()),
            is_approved: Set(false),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn approve(&self, id: &Uuid) -> Result<Option<Testimonial>, DomainError> {
        let existing = testimonials::Entity::find_by_id(*id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let updated = testimonials::ActiveModel {
            id: Set(model.id),
            is_approved: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(updated.into()))
    }

    async fn list_approved(&self) -> Result<Vec<Testimonial>, DomainError> {
        let result = testimonials::Entity::find()
            .filter(testimonials::Column::IsApproved.eq(true))
            .order_by_desc(testimonials::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

pub struct PostgresContactRepository {
    db: DatabaseConnection,
}

impl PostgresContactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<contact_messages::Model> for ContactMessage {
    fn from(m: contact_messages::Model) -> Self {
        ContactMessage {
            id: m.id,
            name: m.name,
            email: m.email,
            phone_number: m.phone_number,
            message: m.message,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(&self, message: &NewContactMessage) -> Result<ContactMessage, DomainError> {
        let result = contact_messages::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(message.name.clone()),
            email: Set(message.email.clone()),
            phone_number: Set(message.phone_number.clone()),
            message: Set(message.message.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find(&self, id: &Uuid) -> Result<Option<ContactMessage>, DomainError> {
        let result = contact_messages::Entity::find_by_id(*id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn add_reply(&self, contact_id: &Uuid, message: &str) -> Result<Reply, DomainError> {
        let result = replies::ActiveModel {
            id: Set(Uuid::new_v4()),
            contact_id: Set(*contact_id),
            message: Set(message.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Reply {
            id: result.id,
            contact_id: result.contact_id,
            message: result.message,
            created_at: result.created_at.with_timezone(&Utc),
        })
    }
}

pub struct PostgresNewsletterRepository {
    db: DatabaseConnection,
}

impl PostgresNewsletterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NewsletterRepository for PostgresNewsletterRepository {
    async fn subscribe(&self, email: &str) -> Result<NewsletterSubscriber, DomainError> {
        // Insert first; the unique index on email is what decides the race
        // between two concurrent subscribes, not a pre-read.
        let result = newsletter_subscribers::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::AlreadyExists("Email is already subscribed.".to_string())
            }
            _ => DomainError::Database(e.to_string()),
        })?;

        Ok(NewsletterSubscriber {
            id: result.id,
            email: result.email,
            created_at: result.created_at.with_timezone(&Utc),
        })
    }
}

pub struct PostgresJobApplicationRepository {
    db: DatabaseConnection,
}

impl PostgresJobApplicationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl JobApplicationRepository for PostgresJobApplicationRepository {
    async fn create(
        &self,
        application: &NewJobApplication,
    ) -> Result<JobApplication, DomainError> {
        let result = job_applications::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(application.name.clone()),
            email: Set(application.email.clone()),
            phone: Set(application.phone.clone()),
            position: Set(application.position.clone()),
            cover_note: Set(application.cover_note.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(JobApplication {
            id: result.id,
            name: result.name,
            email: result.email,
            phone: result.phone,
            position: result.position,
            cover_note: result.cover_note,
            created_at: result.created_at.with_timezone(&Utc),
        })
    }
}
