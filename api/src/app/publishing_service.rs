//! Publishing service
//!
//! Blog posts, site policies and promotional deals. Posts go live only
//! after staff approval; the public policy and deal listings are scoped to
//! active rows.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{BlogPost, Deal, NewBlogPost, NewDeal, NewPolicy, Policy, UpdatePolicy};
use crate::domain::ports::{BlogRepository, DealRepository, PolicyRepository};
use crate::error::AppError;

pub struct PublishingService<BR, PR, DR>
where
    BR: BlogRepository,
    PR: PolicyRepository,
    DR: DealRepository,
{
    blog: Arc<BR>,
    policies: Arc<PR>,
    deals: Arc<DR>,
}

impl<BR, PR, DR> PublishingService<BR, PR, DR>
where
    BR: BlogRepository,
    PR: PolicyRepository,
    DR: DealRepository,
{
    pub fn new(blog: Arc<BR>, policies: Arc<PR>, deals: Arc<DR>) -> Self {
        Self {
            blog,
            policies,
            deals,
        }
    }

    /// Staff-authored post; invisible on the public surface until approved
    pub async fn create_post(
        &self,
        post: NewBlogPost,
        author: &str,
    ) -> Result<BlogPost, AppError> {
        post.validate()?;
        Ok(self.blog.create(&post, author).await?)
    }

    pub async fn approve_post(&self, id: &Uuid) -> Result<BlogPost, AppError> {
        self.blog
            .approve(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found.".to_string()))
    }

    pub async fn published_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(self.blog.list_approved().await?)
    }

    /// Detail lookup; an unapproved post reads as not found
    pub async fn get_post(&self, id: &Uuid) -> Result<BlogPost, AppError> {
        self.blog
            .find_approved(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found.".to_string()))
    }

    pub async fn active_policies(&self) -> Result<Vec<Policy>, AppError> {
        Ok(self.policies.list_active().await?)
    }

    pub async fn create_policy(&self, policy: NewPolicy) -> Result<Policy, AppError> {
        policy.validate()?;
        Ok(self.policies.create(&policy).await?)
    }

    pub async fn update_policy(
        &self,
        id: &Uuid,
        changes: UpdatePolicy,
    ) -> Result<Policy, AppError> {
        Ok(self.policies.update(id, &changes).await?)
    }

    /// Duplicate deal names are a conflict
    pub async fn create_deal(&self, deal: NewDeal) -> Result<Deal, AppError> {
        deal.validate()?;
        Ok(self.deals.create(&deal).await?)
    }

    pub async fn active_deals(&self) -> Result<Vec<Deal>, AppError> {
        Ok(self.deals.list_active().await?)
    }

    pub async fn all_deals(&self) -> Result<Vec<Deal>, AppError> {
        Ok(self.deals.list_all().await?)
    }

    pub async fn delete_deal(&self, id: &Uuid) -> Result<(), AppError> {
        if !self.deals.delete(id).await? {
            return Err(AppError::NotFound("Deal not found.".to_string()));
        }
        Ok(())
    }
}
