use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// HTTP mail gateway base URL (transactional email provider)
    pub mail_gateway_url: String,
    pub mail_gateway_token: String,
    /// Sender address stamped on every outgoing email
    pub email_sender: String,
    /// Address receiving admin copies of booking/contact notifications
    pub admin_email: String,
    /// Master switch; when false the no-op mailer is wired in
    pub email_enabled: bool,
    /// Object storage endpoint holding the shared site-content JSON document
    pub storage_url: String,
    pub storage_bucket: String,
    pub storage_token: String,
    /// Key of the JSON document mirrored for navbar rendering
    pub navbar_object_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            mail_gateway_url: env::var("MAIL_GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:8025".to_string()),
            mail_gateway_token: env::var("MAIL_GATEWAY_TOKEN").unwrap_or_default(),
            email_sender: env::var("EMAIL_SENDER")
                .unwrap_or_else(|_| "noreply@eshop.local".to_string()),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@eshop.local".to_string()),
            email_enabled: env::var("EMAIL_ENABLED")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            storage_url: env::var("STORAGE_URL")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),
            storage_bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| "site-json".to_string()),
            storage_token: env::var("STORAGE_TOKEN").unwrap_or_default(),
            navbar_object_key: env::var("NAVBAR_OBJECT_KEY")
                .unwrap_or_else(|_| "data/datafile.json".to_string()),
        }
    }
}
