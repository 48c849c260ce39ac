//! sea-orm entity models, one module per table

pub mod bookings;
pub mod cancel_bookings;
pub mod catalog;
pub mod clients;
pub mod community;
pub mod contents;
pub mod email_templates;
pub mod payments;
pub mod publishing;
pub mod staff_users;

pub use catalog::{categories, collections, products};
pub use community::{
    contact_messages, job_applications, newsletter_subscribers, replies, testimonials,
};
pub use publishing::{blog_posts, deals, policies};
