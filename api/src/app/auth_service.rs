//! Staff authentication service
//!
//! Register/login/logout plus password reset. Passwords and API keys are
//! stored as SHA-256 hashes; the plaintext API key is returned once at
//! login and revoked at logout.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::app::notification_service::{template_keys, NotificationService};
use crate::domain::entities::{generate_otp, NewStaffUser, StaffUser};
use crate::domain::ports::{EmailTemplateRepository, Mailer, StaffRepository};
use crate::error::{AppError, DomainError};

pub struct AuthService<SR, TR, M>
where
    SR: StaffRepository,
    TR: EmailTemplateRepository,
    M: Mailer,
{
    staff: Arc<SR>,
    notifications: Arc<NotificationService<TR, M>>,
}

impl<SR, TR, M> AuthService<SR, TR, M>
where
    SR: StaffRepository,
    TR: EmailTemplateRepository,
    M: Mailer,
{
    pub fn new(staff: Arc<SR>, notifications: Arc<NotificationService<TR, M>>) -> Self {
        Self {
            staff,
            notifications,
        }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<StaffUser, AppError> {
        if username.trim().is_empty() || username.len() > 50 {
            return Err(AppError::BadRequest(
                "Username must be between 1 and 50 characters".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(AppError::BadRequest(
                "A valid email address is required.".to_string(),
            ));
        }
        if password.len() < 8 {
            return Err(AppError::BadRequest(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if self.staff.find_by_username(username).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(
                "Username is already taken.".to_string(),
            )));
        }
        if self.staff.find_by_email(email).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(
                "Email is already registered.".to_string(),
            )));
        }

        let user = self
            .staff
            .create(&NewStaffUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash_secret(password),
            })
            .await?;

        Ok(user)
    }

    /// Verify credentials and issue a fresh API key. The plaintext key is
    /// only returned here; the database keeps its hash.
    pub async fn login(&self, username: &str, password: &str) -> Result<(StaffUser, String), AppError> {
        let user = self
            .staff
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if user.password_hash != hash_secret(password) {
            return Err(AppError::Unauthorized);
        }

        let api_key = generate_api_key();
        self.staff
            .set_api_key_hash(&user.id, Some(hash_api_key(&api_key)))
            .await?;

        Ok((user, api_key))
    }

    /// Revoke the caller's API key
    pub async fn logout(&self, user: &StaffUser) -> Result<(), AppError> {
        self.staff.set_api_key_hash(&user.id, None).await?;
        Ok(())
    }

    pub async fn authenticate(&self, api_key: &str) -> Result<Option<StaffUser>, AppError> {
        Ok(self.staff.find_by_api_key_hash(&hash_api_key(api_key)).await?)
    }

    /// Email a reset code to the account's address. Responds identically
    /// whether or not the email is registered.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.staff.find_by_email(email).await? else {
            return Ok(());
        };

        let code = generate_otp();
        // The reset code doubles as a one-time API key scoped by its hash
        self.staff
            .set_api_key_hash(&user.id, Some(hash_api_key(&format!("reset:{}", code))))
            .await?;

        let mut context = BTreeMap::new();
        context.insert("username".to_string(), user.username.clone());
        context.insert("reset_code".to_string(), code);
        self.notifications
            .dispatch(template_keys::PASSWORD_RESET, &context, &[user.email])
            .await;

        Ok(())
    }

    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if new_password.len() < 8 {
            return Err(AppError::BadRequest(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let user = self
            .staff
            .find_by_email(email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let expected = hash_api_key(&format!("reset:{}", code));
        if user.api_key_hash.as_deref() != Some(expected.as_str()) {
            return Err(AppError::Unauthorized);
        }

        self.staff
            .set_password_hash(&user.id, &hash_secret(new_password))
            .await?;
        // Consume the reset code
        self.staff.set_api_key_hash(&user.id, None).await?;

        Ok(())
    }
}

/// Generate a random API key
fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("sk-{}", hex::encode(bytes))
}

/// Hash an API key for storage
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash a password for storage
fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
