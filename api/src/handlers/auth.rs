//! Staff authentication handlers

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::StaffUser;
use crate::error::AppError;
use crate::handlers::{envelope, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, AppError> {
    let user = state
        .auth_service
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok(envelope(
        "Account created.",
        RegisterResponse {
            id: user.id.0.to_string(),
            username: user.username,
            email: user.email,
        },
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    /// API key for staff calls (Authorization: Bearer <api_key>); shown once
    pub api_key: String,
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let (user, api_key) = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;

    Ok(envelope(
        "Logged in.",
        LoginResponse {
            username: user.username,
            api_key,
        },
    ))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    state.auth_service.logout(&user).await?;
    Ok(envelope("Logged out.", serde_json::json!({})))
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// POST /auth/password-reset/request
///
/// Responds identically whether or not the email is registered.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    state
        .auth_service
        .request_password_reset(&request.email)
        .await?;
    Ok(envelope(
        "If the email is registered, a reset code has been sent.",
        serde_json::json!({}),
    ))
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirm {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// POST /auth/password-reset/confirm
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetConfirm>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    state
        .auth_service
        .reset_password(&request.email, &request.code, &request.new_password)
        .await?;
    Ok(envelope("Password updated.", serde_json::json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_login_request() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"username": "admin", "password": "hunter2hunter2"}"#).unwrap();
        assert_eq!(request.username, "admin");
    }

    #[test]
    fn login_response_carries_api_key() {
        let response = LoginResponse {
            username: "admin".to_string(),
            api_key: "sk-abc123".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("sk-abc123"));
    }
}
