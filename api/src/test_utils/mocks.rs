//! Mock implementations of port traits
//!
//! In-memory implementations backed by `RwLock<HashMap>`, configurable per
//! test. The recording mailer and storage capture side effects so tests can
//! assert on what was sent and written.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::entities::{
    BlogPost, Booking, BookingId, CancelBooking, CancelBookingId, CatalogTree, Category,
    CategoryId, Client, ClientId, Collection, CollectionId, ContactMessage, Content, Deal,
    EmailTemplate, EmailTemplateId, JobApplication, NewBlogPost, NewBooking, NewCancelBooking,
    NewClient, NewContactMessage, NewDeal, NewJobApplication, NewPolicy, NewStaffUser,
    NewTestimonial, NewsletterSubscriber, OrderStatus, Payment, PaymentId, PaymentMethod,
    PaymentStatus, Policy, Product, ProductId, Reply, StaffId, StaffUser, Testimonial,
    UpdatePolicy, NAVBAR_COMPONENT, NAVBAR_NAME, NAVBAR_PAGE,
};
use crate::domain::ports::{
    BlogRepository, BookingRepository, CancelBookingRepository, CatalogRepository,
    ClientRepository, ContactRepository, ContentRepository, DealRepository,
    EmailTemplateRepository, JobApplicationRepository, Mailer, NewCategory, NewCollection,
    NewProduct, NewsletterRepository, ObjectStorage, PaymentRepository, PolicyRepository,
    StaffRepository, TestimonialRepository, UpdateBooking, UpdateCategory, UpdateCollection,
    UpdateProduct,
};
use crate::error::{DomainError, MailError, StorageError};

// ============================================================================
// Clients
// ============================================================================

#[derive(Default)]
pub struct InMemoryClientRepository {
    clients: Arc<RwLock<HashMap<ClientId, Client>>>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, client: Client) {
        self.clients.write().unwrap().insert(client.id, client);
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        Ok(self.clients.read().unwrap().get(id).cloned())
    }

    async fn create(&self, client: &NewClient, created_by: &str) -> Result<Client, DomainError> {
        let created = client_from_new(client, created_by);
        self.insert(created.clone());
        Ok(created)
    }
}

fn client_from_new(client: &NewClient, created_by: &str) -> Client {
    Client {
        id: ClientId::new(),
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        address: client.address.clone(),
        city: client.city.clone(),
        postal_code: client.postal_code.clone(),
        created_by: created_by.to_string(),
        updated_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ============================================================================
// Bookings (owns the shared payments map so the payment repository can
// mirror statuses the way the transactional adapter does)
// ============================================================================

pub struct InMemoryBookingRepository {
    clients: Arc<InMemoryClientRepository>,
    bookings: Arc<RwLock<HashMap<BookingId, Booking>>>,
    pub(crate) payments: Arc<RwLock<HashMap<BookingId, Payment>>>,
}

impl InMemoryBookingRepository {
    pub fn new(clients: Arc<InMemoryClientRepository>) -> Self {
        Self {
            clients,
            bookings: Arc::new(RwLock::new(HashMap::new())),
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.bookings.read().unwrap().get(id).cloned())
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Booking>, DomainError> {
        Ok(self
            .bookings
            .read()
            .unwrap()
            .values()
            .find(|b| b.order_id == order_id)
            .cloned())
    }

    async fn find_by_order_id_and_phone(
        &self,
        order_id: &str,
        phone: &str,
    ) -> Result<Option<Booking>, DomainError> {
        let Some(booking) = self.find_by_order_id(order_id).await? else {
            return Ok(None);
        };
        let client = self.clients.find_by_id(&booking.client_id).await?;
        Ok(match client {
            Some(c) if c.phone == phone => Some(booking),
            _ => None,
        })
    }

    async fn create_with_client(
        &self,
        client: &NewClient,
        booking: &NewBooking,
        order_id: &str,
        payment_amount: i64,
        transaction_id: Option<i64>,
        created_by: &str,
    ) -> Result<(Client, Booking, Payment), DomainError> {
        if let Some(txid) = transaction_id {
            let duplicate = self
                .payments
                .read()
                .unwrap()
                .values()
                .any(|p| p.transaction_id == Some(txid));
            if duplicate {
                return Err(DomainError::AlreadyExists(
                    "Transaction ID already exists.".to_string(),
                ));
            }
        }

        let created_client = client_from_new(client, created_by);
        self.clients.insert(created_client.clone());

        let created_booking = Booking {
            id: BookingId::new(),
            client_id: created_client.id,
            order_id: order_id.to_string(),
            order_date: booking.order_date,
            dispatch_date: booking.dispatch_date,
            shipping_method: booking
                .shipping_method
                .clone()
                .unwrap_or_else(|| "standard".to_string()),
            selected_items: booking
                .selected_items
                .clone()
                .unwrap_or_else(|| serde_json::json!({})),
            order_status: OrderStatus::Booked,
            payment_status: PaymentStatus::AdvancePaid,
            total_price: booking.total_price,
            is_gift: booking.is_gift,
            created_by: created_by.to_string(),
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let payment = Payment {
            id: PaymentId::new(),
            booking_id: created_booking.id,
            payment_method: if transaction_id.is_some() {
                PaymentMethod::Card
            } else {
                PaymentMethod::Cod
            },
            payment_amount,
            payment_status: PaymentStatus::AdvancePaid,
            transaction_id,
            created_by: created_by.to_string(),
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        self.bookings
            .write()
            .unwrap()
            .insert(created_booking.id, created_booking.clone());
        self.payments
            .write()
            .unwrap()
            .insert(created_booking.id, payment.clone());

        Ok((created_client, created_booking, payment))
    }

    async fn set_dispatch(
        &self,
        id: &BookingId,
        order_date: DateTime<Utc>,
        dispatch_date: NaiveTime,
        updated_by: &str,
    ) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().unwrap();
        let booking = bookings
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound("Booking not found.".to_string()))?;
        booking.order_date = Some(order_date);
        booking.dispatch_date = Some(dispatch_date);
        booking.updated_by = Some(updated_by.to_string());
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn update(
        &self,
        id: &BookingId,
        changes: &UpdateBooking,
        updated_by: &str,
    ) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().unwrap();
        let booking = bookings
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound("Booking not found.".to_string()))?;
        if let Some(status) = changes.order_status {
            booking.order_status = status;
        }
        if let Some(total) = changes.total_price {
            booking.total_price = total;
        }
        if let Some(is_gift) = changes.is_gift {
            booking.is_gift = is_gift;
        }
        if let Some(items) = &changes.selected_items {
            booking.selected_items = items.clone();
        }
        booking.updated_by = Some(updated_by.to_string());
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn mark_cancelled(
        &self,
        id: &BookingId,
        updated_by: &str,
    ) -> Result<bool, DomainError> {
        let mut bookings = self.bookings.write().unwrap();
        let booking = bookings
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound("Booking not found.".to_string()))?;
        if booking.order_status == OrderStatus::Cancelled {
            return Ok(false);
        }
        booking.order_status = OrderStatus::Cancelled;
        booking.updated_by = Some(updated_by.to_string());
        Ok(true)
    }

    async fn count_by_status(&self) -> Result<Vec<(OrderStatus, u64)>, DomainError> {
        let bookings = self.bookings.read().unwrap();
        let statuses = [
            OrderStatus::Booked,
            OrderStatus::InProgress,
            OrderStatus::Dispatched,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ];
        Ok(statuses
            .into_iter()
            .map(|status| {
                let count = bookings.values().filter(|b| b.order_status == status).count();
                (status, count as u64)
            })
            .collect())
    }
}

// ============================================================================
// Payments (shares the booking repository's maps)
// ============================================================================

pub struct InMemoryPaymentRepository {
    bookings: Arc<InMemoryBookingRepository>,
}

impl InMemoryPaymentRepository {
    pub fn new(bookings: Arc<InMemoryBookingRepository>) -> Self {
        Self { bookings }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_by_booking(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .bookings
            .payments
            .read()
            .unwrap()
            .get(booking_id)
            .cloned())
    }

    async fn upsert_pending(
        &self,
        booking_id: &BookingId,
        amount: i64,
        updated_by: &str,
    ) -> Result<(Payment, bool), DomainError> {
        let mut payments = self.bookings.payments.write().unwrap();
        match payments.get_mut(booking_id) {
            Some(payment) => {
                payment.payment_status = PaymentStatus::Pending;
                payment.payment_amount = amount;
                payment.updated_by = Some(updated_by.to_string());
                payment.updated_at = Utc::now();
                Ok((payment.clone(), false))
            }
            None => {
                let payment = Payment {
                    id: PaymentId::new(),
                    booking_id: *booking_id,
                    payment_method: PaymentMethod::Cod,
                    payment_amount: amount,
                    payment_status: PaymentStatus::Pending,
                    transaction_id: None,
                    created_by: updated_by.to_string(),
                    updated_by: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                };
                payments.insert(*booking_id, payment.clone());
                Ok((payment, true))
            }
        }
    }

    async fn set_status_synced(
        &self,
        booking_id: &BookingId,
        status: PaymentStatus,
        updated_by: &str,
    ) -> Result<bool, DomainError> {
        let changed = {
            let mut payments = self.bookings.payments.write().unwrap();
            match payments.get_mut(booking_id) {
                Some(payment) if payment.payment_status != status => {
                    payment.payment_status = status;
                    payment.updated_by = Some(updated_by.to_string());
                    payment.updated_at = Utc::now();
                    true
                }
                _ => false,
            }
        };

        let mut bookings = self.bookings.bookings.write().unwrap();
        if let Some(booking) = bookings.get_mut(booking_id) {
            booking.payment_status = status;
            booking.updated_by = Some(updated_by.to_string());
        }

        Ok(changed)
    }

    async fn paid_revenue(&self) -> Result<i64, DomainError> {
        Ok(self
            .bookings
            .payments
            .read()
            .unwrap()
            .values()
            .filter(|p| p.payment_status == PaymentStatus::Paid)
            .map(|p| p.payment_amount)
            .sum())
    }
}

// ============================================================================
// Cancellations
// ============================================================================

#[derive(Default)]
pub struct InMemoryCancelBookingRepository {
    requests: Arc<RwLock<Vec<CancelBooking>>>,
}

impl InMemoryCancelBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CancelBookingRepository for InMemoryCancelBookingRepository {
    async fn create(&self, request: &NewCancelBooking) -> Result<CancelBooking, DomainError> {
        let record = CancelBooking {
            id: CancelBookingId::new(),
            booking_id: request.booking_id,
            client_id: request.client_id,
            contact_no: request.contact_no.clone(),
            otp: request.otp.clone(),
            created_by: request.created_by.clone(),
            created_at: Utc::now(),
        };
        self.requests.write().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_booking_and_otp(
        &self,
        booking_id: &BookingId,
        otp: &str,
    ) -> Result<Option<CancelBooking>, DomainError> {
        Ok(self
            .requests
            .read()
            .unwrap()
            .iter()
            .find(|r| r.booking_id == *booking_id && r.otp == otp)
            .cloned())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.requests.read().unwrap().len() as u64)
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Default)]
pub struct InMemoryCatalogRepository {
    collections: Arc<RwLock<HashMap<CollectionId, Collection>>>,
    categories: Arc<RwLock<HashMap<CategoryId, Category>>>,
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn load_tree(&self) -> Result<CatalogTree, DomainError> {
        Ok(CatalogTree {
            collections: self.collections.read().unwrap().values().cloned().collect(),
            categories: self.categories.read().unwrap().values().cloned().collect(),
            products: self.products.read().unwrap().values().cloned().collect(),
        })
    }

    async fn find_collection(
        &self,
        id: &CollectionId,
    ) -> Result<Option<Collection>, DomainError> {
        Ok(self.collections.read().unwrap().get(id).cloned())
    }

    async fn create_collection(
        &self,
        collection: &NewCollection,
        _created_by: &str,
    ) -> Result<Collection, DomainError> {
        let created = Collection {
            id: CollectionId::new(),
            name: collection.name.clone(),
            heading: collection.heading.clone(),
            description: collection.description.clone(),
            price_range: collection.price_range.clone(),
            image: collection.image.clone(),
            link: collection.link.clone(),
            sort_order: collection.sort_order,
            is_active: true,
        };
        self.collections
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_collection(
        &self,
        id: &CollectionId,
        changes: &UpdateCollection,
        _updated_by: &str,
    ) -> Result<Collection, DomainError> {
        let mut collections = self.collections.write().unwrap();
        let collection = collections
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound("Collection not found.".to_string()))?;
        if let Some(name) = &changes.name {
            collection.name = name.clone();
        }
        if let Some(heading) = &changes.heading {
            collection.heading = Some(heading.clone());
        }
        if let Some(description) = &changes.description {
            collection.description = Some(description.clone());
        }
        if let Some(price_range) = &changes.price_range {
            collection.price_range = Some(price_range.clone());
        }
        if let Some(image) = &changes.image {
            collection.image = Some(image.clone());
        }
        if let Some(link) = &changes.link {
            collection.link = Some(link.clone());
        }
        if let Some(sort_order) = changes.sort_order {
            collection.sort_order = sort_order;
        }
        if let Some(is_active) = changes.is_active {
            collection.is_active = is_active;
        }
        Ok(collection.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self
            .categories
            .read()
            .unwrap()
            .values()
            .filter(|c| c.is_active)
            .cloned()
            .collect())
    }

    async fn find_category(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        Ok(self.categories.read().unwrap().get(id).cloned())
    }

    async fn create_category(
        &self,
        category: &NewCategory,
        _created_by: &str,
    ) -> Result<Category, DomainError> {
        let created = Category {
            id: CategoryId::new(),
            collection_id: category.collection_id,
            name: category.name.clone(),
            image: category.image.clone(),
            description: category.description.clone(),
            link: category.link.clone(),
            is_active: true,
        };
        self.categories
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        changes: &UpdateCategory,
        _updated_by: &str,
    ) -> Result<Category, DomainError> {
        let mut categories = self.categories.write().unwrap();
        let category = categories
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound("Category not found.".to_string()))?;
        if let Some(name) = &changes.name {
            category.name = name.clone();
        }
        if let Some(image) = &changes.image {
            category.image = Some(image.clone());
        }
        if let Some(description) = &changes.description {
            category.description = Some(description.clone());
        }
        if let Some(link) = &changes.link {
            category.link = Some(link.clone());
        }
        if let Some(is_active) = changes.is_active {
            category.is_active = is_active;
        }
        Ok(category.clone())
    }

    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.read().unwrap().get(id).cloned())
    }

    async fn product_ancestors(&self, id: &ProductId) -> Result<Vec<ProductId>, DomainError> {
        let products = self.products.read().unwrap();
        let mut ancestors = Vec::new();
        let mut current = products.get(id).and_then(|p| p.parent_id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = products.get(&parent).and_then(|p| p.parent_id);
            if ancestors.len() > 16 {
                return Err(DomainError::Internal(
                    "Product parent chain too deep".to_string(),
                ));
            }
        }
        Ok(ancestors)
    }

    async fn create_product(
        &self,
        product: &NewProduct,
        _created_by: &str,
    ) -> Result<Product, DomainError> {
        let created = Product {
            id: ProductId::new(),
            collection_id: product.collection_id,
            category_id: product.category_id,
            parent_id: product.parent_id,
            name: product.name.clone(),
            is_new: product.is_new,
            heading: product.heading.clone(),
            description: product.description.clone(),
            price: product.price,
            discounted_price: product.discounted_price,
            currency: product.currency.clone(),
            image: product.image.clone(),
            link: product.link.clone(),
            is_active: true,
        };
        self.products
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        changes: &UpdateProduct,
        _updated_by: &str,
    ) -> Result<Product, DomainError> {
        let mut products = self.products.write().unwrap();
        let product = products
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound("Product not found.".to_string()))?;
        if let Some(name) = &changes.name {
            product.name = name.clone();
        }
        if let Some(is_new) = changes.is_new {
            product.is_new = is_new;
        }
        if let Some(heading) = &changes.heading {
            product.heading = Some(heading.clone());
        }
        if let Some(description) = &changes.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(discounted_price) = changes.discounted_price {
            product.discounted_price = Some(discounted_price);
        }
        if let Some(currency) = &changes.currency {
            product.currency = Some(currency.clone());
        }
        if let Some(image) = &changes.image {
            product.image = Some(image.clone());
        }
        if let Some(link) = &changes.link {
            product.link = Some(link.clone());
        }
        if let Some(is_active) = changes.is_active {
            product.is_active = is_active;
        }
        Ok(product.clone())
    }

    async fn search_products(
        &self,
        query: Option<&str>,
        is_new: Option<bool>,
    ) -> Result<Vec<Product>, DomainError> {
        let mut result: Vec<Product> = self
            .products
            .read()
            .unwrap()
            .values()
            .filter(|p| p.is_active)
            .filter(|p| query.map(|q| p.name.contains(q)).unwrap_or(true))
            .filter(|p| is_new.map(|flag| p.is_new == flag).unwrap_or(true))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }
}

// ============================================================================
// Email templates
// ============================================================================

#[derive(Default)]
pub struct InMemoryEmailTemplateRepository {
    templates: Arc<RwLock<HashMap<String, EmailTemplate>>>,
}

impl InMemoryEmailTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(self, key: &str, subject: &str, body: &str) -> Self {
        {
            let mut templates = self.templates.write().unwrap();
            templates.insert(
                key.to_string(),
                EmailTemplate {
                    id: EmailTemplateId::new(),
                    template_key: key.to_string(),
                    subject: subject.to_string(),
                    body: body.to_string(),
                    created_by: "system".to_string(),
                    updated_by: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
            );
        }
        self
    }
}

#[async_trait]
impl EmailTemplateRepository for InMemoryEmailTemplateRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<EmailTemplate>, DomainError> {
        Ok(self.templates.read().unwrap().get(key).cloned())
    }

    async fn upsert(
        &self,
        key: &str,
        subject: &str,
        body: &str,
        updated_by: &str,
    ) -> Result<EmailTemplate, DomainError> {
        let mut templates = self.templates.write().unwrap();
        let template = templates
            .entry(key.to_string())
            .and_modify(|t| {
                t.subject = subject.to_string();
                t.body = body.to_string();
                t.updated_by = Some(updated_by.to_string());
                t.updated_at = Utc::now();
            })
            .or_insert_with(|| EmailTemplate {
                id: EmailTemplateId::new(),
                template_key: key.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
                created_by: updated_by.to_string(),
                updated_by: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
        Ok(template.clone())
    }

    async fn list(&self) -> Result<Vec<EmailTemplate>, DomainError> {
        let mut result: Vec<EmailTemplate> =
            self.templates.read().unwrap().values().cloned().collect();
        result.sort_by(|a, b| a.template_key.cmp(&b.template_key));
        Ok(result)
    }
}

// ============================================================================
// Contents
// ============================================================================

#[derive(Default)]
pub struct InMemoryContentRepository {
    navbar: Arc<RwLock<Option<Content>>>,
    upserts: AtomicUsize,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of navbar writes, for rebuild-skip assertions
    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn find_navbar(&self) -> Result<Option<Content>, DomainError> {
        Ok(self.navbar.read().unwrap().clone())
    }

    async fn upsert_navbar(
        &self,
        json: &Value,
        _updated_by: &str,
    ) -> Result<Content, DomainError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        let mut navbar = self.navbar.write().unwrap();
        let content = Content {
            id: navbar.as_ref().map(|c| c.id).unwrap_or_else(Uuid::new_v4),
            page: NAVBAR_PAGE.to_string(),
            component: NAVBAR_COMPONENT.to_string(),
            name: NAVBAR_NAME.to_string(),
            hierarchical_json: Some(json.clone()),
            updated_at: Utc::now(),
        };
        *navbar = Some(content.clone());
        Ok(content)
    }
}

// ============================================================================
// Community
// ============================================================================

#[derive(Default)]
pub struct InMemoryTestimonialRepository {
    testimonials: Arc<RwLock<HashMap<Uuid, Testimonial>>>,
}

impl InMemoryTestimonialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TestimonialRepository for InMemoryTestimonialRepository {
    async fn create(&self, testimonial: &NewTestimonial) -> Result<Testimonial, DomainError> {
        let created = Testimonial {
            id: Uuid::new_v4(),
            name: testimonial.name.clone(),
            email: testimonial.email.clone(),
            location: testimonial.location.clone(),
            message: testimonial.message.clone(),
            is_approved: false,
            created_at: Utc::now(),
        };
        self.testimonials
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn approve(&self, id: &Uuid) -> Result<Option<Testimonial>, DomainError> {
        let mut testimonials = self.testimonials.write().unwrap();
        Ok(testimonials.get_mut(id).map(|t| {
            t.is_approved = true;
            t.clone()
        }))
    }

    async fn list_approved(&self) -> Result<Vec<Testimonial>, DomainError> {
        Ok(self
            .testimonials
            .read()
            .unwrap()
            .values()
            .filter(|t| t.is_approved)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryContactRepository {
    messages: Arc<RwLock<HashMap<Uuid, ContactMessage>>>,
    replies: Arc<RwLock<Vec<Reply>>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, message: &NewContactMessage) -> Result<ContactMessage, DomainError> {
        let created = ContactMessage {
            id: Uuid::new_v4(),
            name: message.name.clone(),
            email: message.email.clone(),
            phone_number: message.phone_number.clone(),
            message: message.message.clone(),
            created_at: Utc::now(),
        };
        self.messages
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find(&self, id: &Uuid) -> Result<Option<ContactMessage>, DomainError> {
        Ok(self.messages.read().unwrap().get(id).cloned())
    }

    async fn add_reply(&self, contact_id: &Uuid, message: &str) -> Result<Reply, DomainError> {
        let reply = Reply {
            id: Uuid::new_v4(),
            contact_id: *contact_id,
            message: message.to_string(),
            created_at: Utc::now(),
        };
        self.replies.write().unwrap().push(reply.clone());
        Ok(reply)
    }
}

#[derive(Default)]
pub struct InMemoryNewsletterRepository {
    subscribers: Arc<RwLock<HashMap<String, NewsletterSubscriber>>>,
}

impl InMemoryNewsletterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsletterRepository for InMemoryNewsletterRepository {
    async fn subscribe(&self, email: &str) -> Result<NewsletterSubscriber, DomainError> {
        let mut subscribers = self.subscribers.write().unwrap();
        if subscribers.contains_key(email) {
            return Err(DomainError::AlreadyExists(
                "Email is already subscribed.".to_string(),
            ));
        }
        let subscriber = NewsletterSubscriber {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        subscribers.insert(email.to_string(), subscriber.clone());
        Ok(subscriber)
    }
}

#[derive(Default)]
pub struct InMemoryJobApplicationRepository {
    applications: Arc<RwLock<Vec<JobApplication>>>,
}

impl InMemoryJobApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobApplicationRepository for InMemoryJobApplicationRepository {
    async fn create(
        &self,
        application: &NewJobApplication,
    ) -> Result<JobApplication, DomainError> {
        let created = JobApplication {
            id: Uuid::new_v4(),
            name: application.name.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            position: application.position.clone(),
            cover_note: application.cover_note.clone(),
            created_at: Utc::now(),
        };
        self.applications.write().unwrap().push(created.clone());
        Ok(created)
    }
}

// ============================================================================
// Publishing
// ============================================================================

#[derive(Default)]
pub struct InMemoryBlogRepository {
    posts: Arc<RwLock<HashMap<Uuid, BlogPost>>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn create(&self, post: &NewBlogPost, author: &str) -> Result<BlogPost, DomainError> {
        let created = BlogPost {
            id: Uuid::new_v4(),
            title: post.title.clone(),
            content: post.content.clone(),
            image: post.image.clone(),
            author: author.to_string(),
            tags: post.tags.clone(),
            is_approved: false,
            is_newsletter: post.is_newsletter,
            date_posted: Utc::now(),
        };
        self.posts.write().unwrap().insert(created.id, created.clone());
        Ok(created)
    }

    async fn approve(&self, id: &Uuid) -> Result<Option<BlogPost>, DomainError> {
        let mut posts = self.posts.write().unwrap();
        Ok(posts.get_mut(id).map(|post| {
            post.is_approved = true;
            post.clone()
        }))
    }

    async fn find_approved(&self, id: &Uuid) -> Result<Option<BlogPost>, DomainError> {
        Ok(self
            .posts
            .read()
            .unwrap()
            .get(id)
            .filter(|p| p.is_approved)
            .cloned())
    }

    async fn list_approved(&self) -> Result<Vec<BlogPost>, DomainError> {
        let mut posts: Vec<BlogPost> = self
            .posts
            .read()
            .unwrap()
            .values()
            .filter(|p| p.is_approved)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.date_posted.cmp(&a.date_posted));
        Ok(posts)
    }
}

#[derive(Default)]
pub struct InMemoryPolicyRepository {
    policies: Arc<RwLock<HashMap<Uuid, Policy>>>,
}

impl InMemoryPolicyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PolicyRepository for InMemoryPolicyRepository {
    async fn create(&self, policy: &NewPolicy) -> Result<Policy, DomainError> {
        let created = Policy {
            id: Uuid::new_v4(),
            title: policy.title.clone(),
            content: policy.content.clone(),
            is_active: policy.is_active,
            created_at: Utc::now(),
        };
        self.policies
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: &Uuid, changes: &UpdatePolicy) -> Result<Policy, DomainError> {
        let mut policies = self.policies.write().unwrap();
        let policy = policies
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound("Policy not found.".to_string()))?;
        if let Some(title) = &changes.title {
            policy.title = title.clone();
        }
        if let Some(content) = &changes.content {
            policy.content = content.clone();
        }
        if let Some(is_active) = changes.is_active {
            policy.is_active = is_active;
        }
        Ok(policy.clone())
    }

    async fn list_active(&self) -> Result<Vec<Policy>, DomainError> {
        let mut policies: Vec<Policy> = self
            .policies
            .read()
            .unwrap()
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        policies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(policies)
    }
}

#[derive(Default)]
pub struct InMemoryDealRepository {
    deals: Arc<RwLock<HashMap<Uuid, Deal>>>,
}

impl InMemoryDealRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DealRepository for InMemoryDealRepository {
    async fn create(&self, deal: &NewDeal) -> Result<Deal, DomainError> {
        let mut deals = self.deals.write().unwrap();
        if deals.values().any(|d| d.name == deal.name) {
            return Err(DomainError::AlreadyExists(
                "Deal with this name already exists.".to_string(),
            ));
        }
        let created = Deal {
            id: Uuid::new_v4(),
            name: deal.name.clone(),
            price: deal.price,
            discounted_price: deal.discounted_price,
            included_items: deal.included_items.clone(),
            is_active: deal.is_active,
            created_at: Utc::now(),
        };
        deals.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_active(&self) -> Result<Vec<Deal>, DomainError> {
        let mut deals: Vec<Deal> = self
            .deals
            .read()
            .unwrap()
            .values()
            .filter(|d| d.is_active)
            .cloned()
            .collect();
        deals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(deals)
    }

    async fn list_all(&self) -> Result<Vec<Deal>, DomainError> {
        let mut deals: Vec<Deal> = self.deals.read().unwrap().values().cloned().collect();
        deals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(deals)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.deals.write().unwrap().remove(id).is_some())
    }
}

// ============================================================================
// Staff
// ============================================================================

#[derive(Default)]
pub struct InMemoryStaffRepository {
    staff: Arc<RwLock<HashMap<StaffId, StaffUser>>>,
}

impl InMemoryStaffRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StaffRepository for InMemoryStaffRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StaffUser>, DomainError> {
        Ok(self
            .staff
            .read()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StaffUser>, DomainError> {
        Ok(self
            .staff
            .read()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<StaffUser>, DomainError> {
        Ok(self
            .staff
            .read()
            .unwrap()
            .values()
            .find(|u| u.api_key_hash.as_deref() == Some(hash))
            .cloned())
    }

    async fn create(&self, staff: &NewStaffUser) -> Result<StaffUser, DomainError> {
        let user = StaffUser {
            id: StaffId::new(),
            username: staff.username.clone(),
            email: staff.email.clone(),
            password_hash: staff.password_hash.clone(),
            api_key_hash: None,
            created_at: Utc::now(),
        };
        self.staff.write().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_api_key_hash(
        &self,
        id: &StaffId,
        hash: Option<String>,
    ) -> Result<(), DomainError> {
        let mut staff = self.staff.write().unwrap();
        let user = staff
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound("Staff user not found.".to_string()))?;
        user.api_key_hash = hash;
        Ok(())
    }

    async fn set_password_hash(&self, id: &StaffId, hash: &str) -> Result<(), DomainError> {
        let mut staff = self.staff.write().unwrap();
        let user = staff
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound("Staff user not found.".to_string()))?;
        user.password_hash = hash.to_string();
        Ok(())
    }
}

// ============================================================================
// Recording mailer
// ============================================================================

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub subject: String,
    pub html_body: String,
    pub recipients: Vec<String>,
}

/// Captures every send so tests can assert on notification behavior
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.write().unwrap().clear();
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        subject: &str,
        html_body: &str,
        recipients: &[String],
    ) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Gateway {
                status: 502,
                message: "simulated failure".to_string(),
            });
        }
        self.sent.write().unwrap().push(SentEmail {
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            recipients: recipients.to_vec(),
        });
        Ok(())
    }
}

// ============================================================================
// In-memory object storage
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    objects: Arc<RwLock<HashMap<String, String>>>,
    fail: bool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            fail: true,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.objects.read().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: &str, body: &str) {
        self.objects
            .write()
            .unwrap()
            .insert(key.to_string(), body.to_string());
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn download(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail {
            return Err(StorageError::Api {
                status: 503,
                message: "simulated failure".to_string(),
            });
        }
        Ok(self.objects.read().unwrap().get(key).cloned())
    }

    async fn upload(&self, key: &str, body: String) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Api {
                status: 503,
                message: "simulated failure".to_string(),
            });
        }
        self.objects.write().unwrap().insert(key.to_string(), body);
        Ok(())
    }
}
