//! Domain entities

pub mod booking;
pub mod cancellation;
pub mod catalog;
pub mod client;
pub mod community;
pub mod content;
pub mod email_template;
pub mod payment;
pub mod publishing;
pub mod staff;

pub use booking::{
    generate_order_id, selected_items_summary, Booking, BookingId, ItemsSummary, NewBooking,
    OrderStatus,
};
pub use cancellation::{generate_otp, CancelBooking, CancelBookingId, NewCancelBooking};
pub use catalog::{
    check_product_depth, CatalogTree, Category, CategoryId, Collection, CollectionId, NavIdentity,
    Product, ProductId,
};
pub use client::{normalize_contact_number, validate_phone, Client, ClientId, NewClient};
pub use community::{
    ContactMessage, JobApplication, NewContactMessage, NewJobApplication, NewTestimonial,
    NewsletterSubscriber, Reply, Testimonial,
};
pub use content::{Content, NAVBAR_COMPONENT, NAVBAR_NAME, NAVBAR_PAGE};
pub use email_template::{render_placeholders, EmailTemplate, EmailTemplateId};
pub use payment::{Payment, PaymentId, PaymentMethod, PaymentStatus};
pub use publishing::{
    BlogPost, Deal, NewBlogPost, NewDeal, NewPolicy, Policy, UpdatePolicy,
};
pub use staff::{NewStaffUser, StaffId, StaffUser};
