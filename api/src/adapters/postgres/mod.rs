//! PostgreSQL repository implementations (sea-orm)

mod booking_repo;
mod cancel_booking_repo;
mod catalog_repo;
mod client_repo;
mod community_repo;
mod content_repo;
mod email_template_repo;
mod payment_repo;
mod publishing_repo;
mod staff_repo;

pub use booking_repo::PostgresBookingRepository;
pub use cancel_booking_repo::PostgresCancelBookingRepository;
pub use catalog_repo::PostgresCatalogRepository;
pub use client_repo::PostgresClientRepository;
pub use community_repo::{
    PostgresContactRepository, PostgresJobApplicationRepository, PostgresNewsletterRepository,
    PostgresTestimonialRepository,
};
pub use content_repo::PostgresContentRepository;
pub use email_template_repo::PostgresEmailTemplateRepository;
pub use payment_repo::PostgresPaymentRepository;
pub use publishing_repo::{
    PostgresBlogRepository, PostgresDealRepository, PostgresPolicyRepository,
};
pub use staff_repo::PostgresStaffRepository;
