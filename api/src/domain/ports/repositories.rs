//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (PostgreSQL in production,
//! in-memory mocks in tests).

use async_trait::async_trait;

use chrono::{DateTime, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::{
    BlogPost, Booking, BookingId, CancelBooking, CatalogTree, Category, CategoryId, Client,
    ClientId, Collection, CollectionId, ContactMessage, Content, Deal, EmailTemplate,
    JobApplication, NewBlogPost, NewBooking, NewCancelBooking, NewClient, NewContactMessage,
    NewDeal, NewJobApplication, NewPolicy, NewStaffUser, NewTestimonial, NewsletterSubscriber,
    OrderStatus, Payment, PaymentStatus, Policy, Product, ProductId, Reply, StaffId, StaffUser,
    Testimonial, UpdatePolicy,
};
use crate::error::DomainError;

/// Repository for Client entities
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError>;

    async fn create(&self, client: &NewClient, created_by: &str) -> Result<Client, DomainError>;
}

/// Partial update of a booking. `None` fields are left untouched, which is
/// what preserves `selected_items` when the caller does not resend it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBooking {
    pub order_status: Option<OrderStatus>,
    pub total_price: Option<i64>,
    pub is_gift: Option<bool>,
    pub selected_items: Option<Value>,
}

/// Repository for Booking entities
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Booking>, DomainError>;

    /// Lookup by customer-facing order id and the client's registered phone
    async fn find_by_order_id_and_phone(
        &self,
        order_id: &str,
        phone: &str,
    ) -> Result<Option<Booking>, DomainError>;

    /// Atomically create a client, their booking and the initial payment
    /// record in one transaction. Fails with `AlreadyExists` when the
    /// transaction id is already recorded.
    #[allow(clippy::too_many_arguments)]
    async fn create_with_client(
        &self,
        client: &NewClient,
        booking: &NewBooking,
        order_id: &str,
        payment_amount: i64,
        transaction_id: Option<i64>,
        created_by: &str,
    ) -> Result<(Client, Booking, Payment), DomainError>;

    /// Set order/dispatch dates (staff allocation)
    async fn set_dispatch(
        &self,
        id: &BookingId,
        order_date: DateTime<Utc>,
        dispatch_date: NaiveTime,
        updated_by: &str,
    ) -> Result<Booking, DomainError>;

    /// Apply a partial update; untouched columns keep their stored value
    async fn update(
        &self,
        id: &BookingId,
        changes: &UpdateBooking,
        updated_by: &str,
    ) -> Result<Booking, DomainError>;

    /// Conditionally flip the order status to CANCELLED.
    /// Returns false when the booking was already cancelled.
    async fn mark_cancelled(&self, id: &BookingId, updated_by: &str)
        -> Result<bool, DomainError>;

    /// Booking counts per order status, for the reporting dashboard
    async fn count_by_status(&self) -> Result<Vec<(OrderStatus, u64)>, DomainError>;
}

/// Repository for Payment entities (one logical payment per booking)
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_booking(&self, booking_id: &BookingId)
        -> Result<Option<Payment>, DomainError>;

    /// Fetch-or-create the booking's payment with status PENDING and the
    /// given amount; an existing payment is refreshed, never duplicated.
    /// Returns the payment and whether it was created.
    async fn upsert_pending(
        &self,
        booking_id: &BookingId,
        amount: i64,
        updated_by: &str,
    ) -> Result<(Payment, bool), DomainError>;

    /// Set the payment status and mirror it onto the booking row inside one
    /// transaction. The payment-side write is conditional
    /// (`WHERE payment_status <> $new`); the returned flag is true only when
    /// the status actually changed, which is what makes the PAID
    /// notification fire exactly once.
    async fn set_status_synced(
        &self,
        booking_id: &BookingId,
        status: PaymentStatus,
        updated_by: &str,
    ) -> Result<bool, DomainError>;

    /// Sum of amounts across PAID payments, for the reporting dashboard
    async fn paid_revenue(&self) -> Result<i64, DomainError>;
}

/// Repository for cancellation requests
#[async_trait]
pub trait CancelBookingRepository: Send + Sync {
    async fn create(&self, request: &NewCancelBooking) -> Result<CancelBooking, DomainError>;

    async fn find_by_booking_and_otp(
        &self,
        booking_id: &BookingId,
        otp: &str,
    ) -> Result<Option<CancelBooking>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCollection {
    pub name: String,
    pub heading: Option<String>,
    pub description: Option<String>,
    pub price_range: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCollection {
    pub name: Option<String>,
    pub heading: Option<String>,
    pub description: Option<String>,
    pub price_range: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub collection_id: CollectionId,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub collection_id: Option<CollectionId>,
    pub category_id: Option<CategoryId>,
    pub parent_id: Option<ProductId>,
    pub name: String,
    pub is_new: bool,
    pub heading: Option<String>,
    pub description: Option<String>,
    pub price: i64,
    pub discounted_price: Option<i64>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub is_new: Option<bool>,
    pub heading: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub discounted_price: Option<i64>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub is_active: Option<bool>,
}

/// Repository for the catalog hierarchy
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Load the full active catalog (collections, categories, products)
    async fn load_tree(&self) -> Result<CatalogTree, DomainError>;

    async fn find_collection(&self, id: &CollectionId)
        -> Result<Option<Collection>, DomainError>;

    async fn create_collection(
        &self,
        collection: &NewCollection,
        created_by: &str,
    ) -> Result<Collection, DomainError>;

    async fn update_collection(
        &self,
        id: &CollectionId,
        changes: &UpdateCollection,
        updated_by: &str,
    ) -> Result<Collection, DomainError>;

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;

    async fn find_category(&self, id: &CategoryId) -> Result<Option<Category>, DomainError>;

    async fn create_category(
        &self,
        category: &NewCategory,
        created_by: &str,
    ) -> Result<Category, DomainError>;

    async fn update_category(
        &self,
        id: &CategoryId,
        changes: &UpdateCategory,
        updated_by: &str,
    ) -> Result<Category, DomainError>;

    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Parent chain of a product, immediate parent first
    async fn product_ancestors(&self, id: &ProductId) -> Result<Vec<ProductId>, DomainError>;

    async fn create_product(
        &self,
        product: &NewProduct,
        created_by: &str,
    ) -> Result<Product, DomainError>;

    async fn update_product(
        &self,
        id: &ProductId,
        changes: &UpdateProduct,
        updated_by: &str,
    ) -> Result<Product, DomainError>;

    /// Name search with an optional `is_new` filter
    async fn search_products(
        &self,
        query: Option<&str>,
        is_new: Option<bool>,
    ) -> Result<Vec<Product>, DomainError>;
}

/// Repository for stored email templates
#[async_trait]
pub trait EmailTemplateRepository: Send + Sync {
    async fn find_by_key(&self, key: &str) -> Result<Option<EmailTemplate>, DomainError>;

    async fn upsert(
        &self,
        key: &str,
        subject: &str,
        body: &str,
        updated_by: &str,
    ) -> Result<EmailTemplate, DomainError>;

    async fn list(&self) -> Result<Vec<EmailTemplate>, DomainError>;
}

/// Repository for denormalized site content rows
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn find_navbar(&self) -> Result<Option<Content>, DomainError>;

    async fn upsert_navbar(&self, json: &Value, updated_by: &str)
        -> Result<Content, DomainError>;
}

/// Repository for testimonials
#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn create(&self, testimonial: &NewTestimonial) -> Result<Testimonial, DomainError>;

    async fn approve(&self, id: &Uuid) -> Result<Option<Testimonial>, DomainError>;

    async fn list_approved(&self) -> Result<Vec<Testimonial>, DomainError>;
}

/// Repository for contact-us messages and their replies
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: &NewContactMessage) -> Result<ContactMessage, DomainError>;

    async fn find(&self, id: &Uuid) -> Result<Option<ContactMessage>, DomainError>;

    async fn add_reply(&self, contact_id: &Uuid, message: &str) -> Result<Reply, DomainError>;
}

/// Repository for newsletter subscriptions
#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    /// Fails with `AlreadyExists` for a duplicate email
    async fn subscribe(&self, email: &str) -> Result<NewsletterSubscriber, DomainError>;
}

/// Repository for hiring applications
#[async_trait]
pub trait JobApplicationRepository: Send + Sync {
    async fn create(&self, application: &NewJobApplication)
        -> Result<JobApplication, DomainError>;
}

/// Repository for blog posts
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, post: &NewBlogPost, author: &str) -> Result<BlogPost, DomainError>;

    async fn approve(&self, id: &Uuid) -> Result<Option<BlogPost>, DomainError>;

    /// Detail lookup; unapproved posts are invisible here
    async fn find_approved(&self, id: &Uuid) -> Result<Option<BlogPost>, DomainError>;

    async fn list_approved(&self) -> Result<Vec<BlogPost>, DomainError>;
}

/// Repository for site policies
#[async_trait]
pub trait PolicyRepository: Send + Sync {
    async fn create(&self, policy: &NewPolicy) -> Result<Policy, DomainError>;

    async fn update(&self, id: &Uuid, changes: &UpdatePolicy) -> Result<Policy, DomainError>;

    async fn list_active(&self) -> Result<Vec<Policy>, DomainError>;
}

/// Repository for promotional deals
#[async_trait]
pub trait DealRepository: Send + Sync {
    /// Fails with `AlreadyExists` for a duplicate deal name
    async fn create(&self, deal: &NewDeal) -> Result<Deal, DomainError>;

    async fn list_active(&self) -> Result<Vec<Deal>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Deal>, DomainError>;

    /// Returns false when no deal with the id exists
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
}

/// Repository for staff users
#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<StaffUser>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<StaffUser>, DomainError>;

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<StaffUser>, DomainError>;

    async fn create(&self, staff: &NewStaffUser) -> Result<StaffUser, DomainError>;

    /// Rotate (Some) or revoke (None) the issued API key
    async fn set_api_key_hash(
        &self,
        id: &StaffId,
        hash: Option<String>,
    ) -> Result<(), DomainError>;

    async fn set_password_hash(&self, id: &StaffId, hash: &str) -> Result<(), DomainError>;
}
