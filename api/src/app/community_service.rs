//! Community service
//!
//! Testimonials, contact-us messages with staff replies, newsletter
//! subscriptions and job applications.

use std::collections::BTreeMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::app::notification_service::{template_keys, NotificationService};
use crate::domain::entities::{
    ContactMessage, JobApplication, NewContactMessage, NewJobApplication, NewTestimonial,
    NewsletterSubscriber, Reply, Testimonial,
};
use crate::domain::ports::{
    ContactRepository, EmailTemplateRepository, JobApplicationRepository, Mailer,
    NewsletterRepository, TestimonialRepository,
};
use crate::error::AppError;

pub struct CommunityService<TSR, COR, NR, JR, TR, M>
where
    TSR: TestimonialRepository,
    COR: ContactRepository,
    NR: NewsletterRepository,
    JR: JobApplicationRepository,
    TR: EmailTemplateRepository,
    M: Mailer,
{
    testimonials: Arc<TSR>,
    contacts: Arc<COR>,
    newsletter: Arc<NR>,
    applications: Arc<JR>,
    notifications: Arc<NotificationService<TR, M>>,
}

impl<TSR, COR, NR, JR, TR, M> CommunityService<TSR, COR, NR, JR, TR, M>
where
    TSR: TestimonialRepository,
    COR: ContactRepository,
    NR: NewsletterRepository,
    JR: JobApplicationRepository,
    TR: EmailTemplateRepository,
    M: Mailer,
{
    pub fn new(
        testimonials: Arc<TSR>,
        contacts: Arc<COR>,
        newsletter: Arc<NR>,
        applications: Arc<JR>,
        notifications: Arc<NotificationService<TR, M>>,
    ) -> Self {
        Self {
            testimonials,
            contacts,
            newsletter,
            applications,
            notifications,
        }
    }

    pub async fn submit_testimonial(
        &self,
        testimonial: NewTestimonial,
    ) -> Result<Testimonial, AppError> {
        testimonial.validate()?;
        Ok(self.testimonials.create(&testimonial).await?)
    }

    pub async fn approve_testimonial(&self, id: &Uuid) -> Result<Testimonial, AppError> {
        self.testimonials
            .approve(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Testimonial not found.".to_string()))
    }

    pub async fn approved_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        Ok(self.testimonials.list_approved().await?)
    }

    /// Record a contact-us message and acknowledge it to both the sender and
    /// the admin inbox.
    pub async fn submit_contact(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, AppError> {
        message.validate()?;
        let created = self.contacts.create(&message).await?;

        let mut context = BTreeMap::new();
        context.insert("name".to_string(), created.name.clone());
        context.insert("message".to_string(), created.message.clone());

        if let Some(email) = &created.email {
            self.notifications
                .dispatch(
                    template_keys::CONTACT_US_CLIENT,
                    &context,
                    &[email.clone()],
                )
                .await;
        }
        self.notifications
            .dispatch(
                template_keys::CONTACT_US_ADMIN,
                &context,
                &[self.notifications.admin_email().to_string()],
            )
            .await;

        Ok(created)
    }

    /// Staff reply to a contact message, emailed to the original sender
    pub async fn reply_to_contact(
        &self,
        contact_id: &Uuid,
        message: &str,
    ) -> Result<Reply, AppError> {
        if message.trim().is_empty() {
            return Err(AppError::BadRequest("Reply message is required.".to_string()));
        }

        let contact = self
            .contacts
            .find(contact_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact message not found.".to_string()))?;

        let reply = self.contacts.add_reply(contact_id, message).await?;

        if let Some(email) = &contact.email {
            let mut context = BTreeMap::new();
            context.insert("name".to_string(), contact.name.clone());
            context.insert("reply".to_string(), message.to_string());
            self.notifications
                .dispatch(template_keys::REPLY_USER, &context, &[email.clone()])
                .await;
        }

        Ok(reply)
    }

    /// Subscribe an email to the newsletter; duplicates are a conflict
    pub async fn subscribe_newsletter(
        &self,
        email: &str,
    ) -> Result<NewsletterSubscriber, AppError> {
        if !email.contains('@') {
            return Err(AppError::BadRequest(
                "A valid email address is required.".to_string(),
            ));
        }

        let subscriber = self.newsletter.subscribe(email).await?;

        let mut context = BTreeMap::new();
        context.insert("email".to_string(), subscriber.email.clone());
        self.notifications
            .dispatch(
                template_keys::NEWSLETTER_MAIL,
                &context,
                &[subscriber.email.clone()],
            )
            .await;

        Ok(subscriber)
    }

    pub async fn submit_application(
        &self,
        application: NewJobApplication,
    ) -> Result<JobApplication, AppError> {
        application.validate()?;
        Ok(self.applications.create(&application).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        seeded_templates, InMemoryContactRepository, InMemoryEmailTemplateRepository,
        InMemoryJobApplicationRepository, InMemoryNewsletterRepository,
        InMemoryTestimonialRepository, RecordingMailer,
    };

    type TestService = CommunityService<
        InMemoryTestimonialRepository,
        InMemoryContactRepository,
        InMemoryNewsletterRepository,
        InMemoryJobApplicationRepository,
        InMemoryEmailTemplateRepository,
        RecordingMailer,
    >;

    fn service(mailer: RecordingMailer) -> TestService {
        CommunityService::new(
            Arc::new(InMemoryTestimonialRepository::new()),
            Arc::new(InMemoryContactRepository::new()),
            Arc::new(InMemoryNewsletterRepository::new()),
            Arc::new(InMemoryJobApplicationRepository::new()),
            Arc::new(NotificationService::new(
                Arc::new(seeded_templates()),
                Arc::new(mailer),
                "admin@example.com".to_string(),
            )),
        )
    }

    #[tokio::test]
    async fn testimonials_start_unapproved() {
        let service = service(RecordingMailer::new());

        let t = service
            .submit_testimonial(NewTestimonial {
                name: "Sara".into(),
                email: None,
                location: Some("Lahore".into()),
                message: "Great service".into(),
            })
            .await
            .unwrap();
        assert!(!t.is_approved);
        assert!(service.approved_testimonials().await.unwrap().is_empty());

        service.approve_testimonial(&t.id).await.unwrap();
        assert_eq!(service.approved_testimonials().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn contact_notifies_sender_and_admin() {
        let mailer = RecordingMailer::new();
        let service = service(mailer.clone());

        service
            .submit_contact(NewContactMessage {
                name: "Sara".into(),
                email: Some("sara@example.com".into()),
                phone_number: Some("03001234567".into()),
                message: "Opening hours?".into(),
            })
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent
            .iter()
            .any(|m| m.recipients.contains(&"sara@example.com".to_string())));
        assert!(sent
            .iter()
            .any(|m| m.recipients.contains(&"admin@example.com".to_string())));
    }

    #[tokio::test]
    async fn reply_reaches_the_sender() {
        let mailer = RecordingMailer::new();
        let service = service(mailer.clone());

        let contact = service
            .submit_contact(NewContactMessage {
                name: "Sara".into(),
                email: Some("sara@example.com".into()),
                phone_number: None,
                message: "Opening hours?".into(),
            })
            .await
            .unwrap();
        mailer.clear();

        service
            .reply_to_contact(&contact.id, "We open at 10am.")
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html_body.contains("We open at 10am."));
    }

    #[tokio::test]
    async fn duplicate_newsletter_subscription_conflicts() {
        let service = service(RecordingMailer::new());

        service
            .subscribe_newsletter("sara@example.com")
            .await
            .unwrap();
        let err = service
            .subscribe_newsletter("sara@example.com")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("already subscribed"));
    }

    #[tokio::test]
    async fn racing_subscribes_settle_as_one_win_one_conflict() {
        let service = service(RecordingMailer::new());

        let (a, b) = tokio::join!(
            service.subscribe_newsletter("sara@example.com"),
            service.subscribe_newsletter("sara@example.com")
        );

        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        let err = outcomes.iter().find_map(|r| r.as_ref().err()).unwrap();
        // The loser must see the conflict, not a masked internal error
        assert!(err.to_string().contains("already subscribed"));
    }

    #[tokio::test]
    async fn application_requires_valid_phone() {
        let service = service(RecordingMailer::new());

        let err = service
            .submit_application(NewJobApplication {
                name: "Bilal".into(),
                email: "bilal@example.com".into(),
                phone: "03001234567".into(),
                position: "Stylist".into(),
                cover_note: None,
            })
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Country code required"));
    }
}
