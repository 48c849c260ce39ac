//! Application services
//!
//! Business logic sits here, wired to repositories and transports through
//! the domain ports.

pub mod auth_service;
pub mod booking_service;
pub mod cancellation_service;
pub mod catalog_service;
pub mod community_service;
pub mod notification_service;
pub mod publishing_service;

pub use auth_service::{hash_api_key, AuthService};
pub use booking_service::{BookingService, DashboardReport};
pub use cancellation_service::CancellationService;
pub use catalog_service::CatalogService;
pub use community_service::CommunityService;
pub use notification_service::{template_keys, NotificationService, SendOutcome};
pub use publishing_service::PublishingService;
