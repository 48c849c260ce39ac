//! EShop API Server
//!
//! Backend for the storefront and salon booking flows: bookings with
//! payments and OTP-gated cancellation, the catalog hierarchy feeding a
//! denormalized navbar, template-driven email notifications, and the
//! community surface (testimonials, contact, newsletter, hiring).
//! Uses hexagonal (ports & adapters) architecture.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

use adapters::mail::{HttpMailer, MailTransport, NoopMailer};
use adapters::postgres::{
    PostgresBlogRepository, PostgresBookingRepository, PostgresCancelBookingRepository,
    PostgresCatalogRepository, PostgresClientRepository, PostgresContactRepository,
    PostgresContentRepository, PostgresDealRepository, PostgresEmailTemplateRepository,
    PostgresJobApplicationRepository, PostgresNewsletterRepository, PostgresPaymentRepository,
    PostgresPolicyRepository, PostgresStaffRepository, PostgresTestimonialRepository,
};
use adapters::storage::HttpObjectStorage;
use app::{
    AuthService, BookingService, CancellationService, CatalogService, CommunityService,
    NotificationService, PublishingService,
};
use config::Config;

type AppNotificationService = NotificationService<PostgresEmailTemplateRepository, MailTransport>;
type AppBookingService = BookingService<
    PostgresClientRepository,
    PostgresBookingRepository,
    PostgresPaymentRepository,
    PostgresEmailTemplateRepository,
    MailTransport,
>;
type AppCancellationService = CancellationService<
    PostgresClientRepository,
    PostgresBookingRepository,
    PostgresCancelBookingRepository,
    PostgresEmailTemplateRepository,
    MailTransport,
>;
type AppCatalogService =
    CatalogService<PostgresCatalogRepository, PostgresContentRepository, HttpObjectStorage>;
type AppCommunityService = CommunityService<
    PostgresTestimonialRepository,
    PostgresContactRepository,
    PostgresNewsletterRepository,
    PostgresJobApplicationRepository,
    PostgresEmailTemplateRepository,
    MailTransport,
>;
type AppPublishingService =
    PublishingService<PostgresBlogRepository, PostgresPolicyRepository, PostgresDealRepository>;
type AppAuthService =
    AuthService<PostgresStaffRepository, PostgresEmailTemplateRepository, MailTransport>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub booking_service: Arc<AppBookingService>,
    pub cancellation_service: Arc<AppCancellationService>,
    pub catalog_service: Arc<AppCatalogService>,
    pub community_service: Arc<AppCommunityService>,
    pub publishing_service: Arc<AppPublishingService>,
    pub auth_service: Arc<AppAuthService>,
    pub templates: Arc<PostgresEmailTemplateRepository>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eshop_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EShop API...");

    let config = Config::from_env();

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connected");

    // Repositories
    let client_repo = Arc::new(PostgresClientRepository::new(db.clone()));
    let booking_repo = Arc::new(PostgresBookingRepository::new(db.clone()));
    let payment_repo = Arc::new(PostgresPaymentRepository::new(db.clone()));
    let cancel_repo = Arc::new(PostgresCancelBookingRepository::new(db.clone()));
    let catalog_repo = Arc::new(PostgresCatalogRepository::new(db.clone()));
    let template_repo = Arc::new(PostgresEmailTemplateRepository::new(db.clone()));
    let content_repo = Arc::new(PostgresContentRepository::new(db.clone()));
    let testimonial_repo = Arc::new(PostgresTestimonialRepository::new(db.clone()));
    let contact_repo = Arc::new(PostgresContactRepository::new(db.clone()));
    let newsletter_repo = Arc::new(PostgresNewsletterRepository::new(db.clone()));
    let application_repo = Arc::new(PostgresJobApplicationRepository::new(db.clone()));
    let blog_repo = Arc::new(PostgresBlogRepository::new(db.clone()));
    let policy_repo = Arc::new(PostgresPolicyRepository::new(db.clone()));
    let deal_repo = Arc::new(PostgresDealRepository::new(db.clone()));
    let staff_repo = Arc::new(PostgresStaffRepository::new(db.clone()));

    // Transports
    let mailer = Arc::new(if config.email_enabled {
        MailTransport::Http(HttpMailer::new(
            config.mail_gateway_url.clone(),
            config.mail_gateway_token.clone(),
            config.email_sender.clone(),
        ))
    } else {
        tracing::info!("Email sending disabled, using no-op mailer");
        MailTransport::Noop(NoopMailer)
    });
    let storage = Arc::new(HttpObjectStorage::new(
        config.storage_url.clone(),
        config.storage_bucket.clone(),
        config.storage_token.clone(),
    ));

    // Services
    let notifications: Arc<AppNotificationService> = Arc::new(NotificationService::new(
        template_repo.clone(),
        mailer,
        config.admin_email.clone(),
    ));
    let booking_service = Arc::new(BookingService::new(
        client_repo.clone(),
        booking_repo.clone(),
        payment_repo,
        notifications.clone(),
    ));
    let cancellation_service = Arc::new(CancellationService::new(
        client_repo,
        booking_repo,
        cancel_repo,
        notifications.clone(),
    ));
    let catalog_service = Arc::new(CatalogService::new(
        catalog_repo,
        content_repo,
        storage,
        config.navbar_object_key.clone(),
    ));
    let community_service = Arc::new(CommunityService::new(
        testimonial_repo,
        contact_repo,
        newsletter_repo,
        application_repo,
        notifications.clone(),
    ));
    let publishing_service = Arc::new(PublishingService::new(blog_repo, policy_repo, deal_repo));
    let auth_service = Arc::new(AuthService::new(staff_repo, notifications));

    let state = AppState {
        booking_service,
        cancellation_service,
        catalog_service,
        community_service,
        publishing_service,
        auth_service,
        templates: template_repo,
    };

    // Rate limiting: 2 req/sec sustained, burst of 5, keyed by peer IP
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("Failed to build governor config"),
    );

    // Abuse-prone public endpoints get the rate limit
    let rate_limited_routes = Router::new()
        .route("/bookings", post(handlers::create_booking))
        .route(
            "/bookings/cancel/request-otp",
            post(handlers::request_cancellation_otp),
        )
        .route(
            "/bookings/cancel/confirm",
            post(handlers::confirm_cancellation),
        )
        .route("/contact", post(handlers::submit_contact))
        .route("/newsletter/subscribe", post(handlers::subscribe_newsletter))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route(
            "/auth/password-reset/request",
            post(handlers::request_password_reset),
        )
        .route(
            "/auth/password-reset/confirm",
            post(handlers::reset_password),
        )
        .layer(GovernorLayer {
            config: governor_config,
        });

    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public storefront endpoints
        .route("/bookings/:order_id", get(handlers::get_booking))
        .route("/catalog", get(handlers::browse_catalog))
        .route("/catalog/navbar", get(handlers::get_navbar))
        .route("/catalog/categories", get(handlers::list_categories))
        .route("/products/search", get(handlers::search_products))
        .route("/testimonials", get(handlers::list_testimonials))
        .route("/testimonials", post(handlers::submit_testimonial))
        .route("/blog/posts", get(handlers::list_blog_posts))
        .route("/blog/posts/:id", get(handlers::get_blog_post))
        .route("/policies", get(handlers::list_policies))
        .route("/deals", get(handlers::list_deals))
        .route("/careers/apply", post(handlers::apply_for_job))
        .merge(rate_limited_routes)
        // Staff routes (Bearer API key)
        .nest(
            "/",
            Router::new()
                .route("/auth/logout", post(handlers::logout))
                .route("/admin/dashboard", get(handlers::dashboard))
                .route(
                    "/admin/bookings/:id/allocate",
                    post(handlers::allocate_dispatch),
                )
                .route("/admin/bookings/:id", patch(handlers::update_booking))
                .route(
                    "/admin/bookings/:id/payment-status",
                    post(handlers::set_payment_status),
                )
                .route(
                    "/admin/bookings/:id/cancel",
                    post(handlers::admin_cancel_booking),
                )
                .route("/admin/collections", post(handlers::create_collection))
                .route(
                    "/admin/collections/:id",
                    patch(handlers::update_collection),
                )
                .route("/admin/categories", post(handlers::create_category))
                .route("/admin/categories/:id", patch(handlers::update_category))
                .route("/admin/products", post(handlers::create_product))
                .route("/admin/products/:id", patch(handlers::update_product))
                .route("/admin/navbar/rebuild", post(handlers::rebuild_navbar))
                .route(
                    "/admin/email-templates",
                    get(handlers::list_email_templates),
                )
                .route(
                    "/admin/email-templates",
                    put(handlers::upsert_email_template),
                )
                .route(
                    "/admin/testimonials/:id/approve",
                    post(handlers::approve_testimonial),
                )
                .route("/admin/contact/:id/reply", post(handlers::reply_to_contact))
                .route("/admin/blog/posts", post(handlers::create_blog_post))
                .route(
                    "/admin/blog/posts/:id/approve",
                    post(handlers::approve_blog_post),
                )
                .route("/admin/policies", post(handlers::create_policy))
                .route("/admin/policies/:id", patch(handlers::update_policy))
                .route("/admin/deals", get(handlers::list_all_deals))
                .route("/admin/deals", post(handlers::create_deal))
                .route("/admin/deals/:id", delete(handlers::delete_deal))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::auth_middleware,
                )),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
