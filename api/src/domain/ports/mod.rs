//! Ports (interfaces) for external dependencies

pub mod mailer;
pub mod repositories;
pub mod storage;

pub use mailer::Mailer;
pub use repositories::{
    BlogRepository, BookingRepository, CancelBookingRepository, CatalogRepository,
    ClientRepository, ContactRepository, ContentRepository, DealRepository,
    EmailTemplateRepository, JobApplicationRepository, NewCategory, NewCollection, NewProduct,
    NewsletterRepository, PaymentRepository, PolicyRepository, StaffRepository,
    TestimonialRepository, UpdateBooking, UpdateCategory, UpdateCollection, UpdateProduct,
};
pub use storage::ObjectStorage;
