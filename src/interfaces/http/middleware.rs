//! Authentication middleware for Axum
//!
//! JWT bearer tokens only. `auth_middleware` rejects unauthenticated
//! requests, `optional_auth_middleware` attaches the account when a
//! valid token is present and lets everything else through (guest
//! bookings rely on this).

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientPermissions,
}

/// Authentication state containing JWT config
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated account information extracted from the token
#[derive(Clone, Debug)]
pub struct AuthenticatedAccount {
    pub account_id: String,
    pub email: String,
    pub role: String,
}

impl AuthenticatedAccount {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            account_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let account = AuthenticatedAccount::from_claims(claims);
            request.extensions_mut().insert(account);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Optional authentication middleware
pub async fn optional_auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = extract_token(auth_header) {
            if let Ok(claims) = verify_token(token, &auth_state.jwt_config) {
                if !claims.is_expired() {
                    let account = AuthenticatedAccount::from_claims(claims);
                    request.extensions_mut().insert(account);
                }
            }
        }
    }

    next.run(request).await
}

/// Admin-only middleware; must run after `auth_middleware`.
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<AuthenticatedAccount>()
        .map(|a| a.is_admin())
        .unwrap_or(false);

    if !is_admin {
        return auth_error_response(AuthError::InsufficientPermissions);
    }
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message, code) = match error {
        AuthError::MissingToken => (
            StatusCode::UNAUTHORIZED,
            "Missing authentication token",
            "unauthorized",
        ),
        AuthError::InvalidToken => (
            StatusCode::UNAUTHORIZED,
            "Invalid authentication token",
            "unauthorized",
        ),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired", "unauthorized"),
        AuthError::InsufficientPermissions => (
            StatusCode::FORBIDDEN,
            "Insufficient permissions",
            "unauthorized",
        ),
    };

    let body = Json(json!({
        "success": false,
        "error": message,
        "error_code": code
    }));

    (status, body).into_response()
}
