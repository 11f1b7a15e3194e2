//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{
    AccountInfo, LoginRequest, MessageResponse, RegisterRequest, ResendOtpRequest,
    SessionResponse, SetPasswordRequest, VerifyOtpRequest,
};
use crate::application::services::{RegistrationService, Session};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

/// Auth handler state
#[derive(Clone)]
pub struct AuthAppState {
    pub registration: Arc<RegistrationService>,
    pub token_expiration_hours: i64,
}

fn session_response(session: Session, expiration_hours: i64) -> SessionResponse {
    SessionResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: expiration_hours * 3600,
        account: AccountInfo::from(session.account),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 202, description = "Verification code dispatched", body = ApiResponse<MessageResponse>),
        (status = 409, description = "Account already active"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthAppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    state
        .registration
        .register(&request.email, &request.name, &request.phone)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(MessageResponse {
            message: format!("Verification code sent to {}", request.email),
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/verify-otp",
    tag = "Authentication",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Account verified", body = ApiResponse<MessageResponse>),
        (status = 400, description = "Wrong or expired code"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn verify_otp(
    State(state): State<AuthAppState>,
    ValidatedJson(request): ValidatedJson<VerifyOtpRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .registration
        .verify_otp(&request.email, &request.code)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Account verified, set a password to finish".to_string(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/set-password",
    tag = "Authentication",
    request_body = SetPasswordRequest,
    responses(
        (status = 200, description = "Account activated", body = ApiResponse<SessionResponse>),
        (status = 400, description = "Weak password or unverified account"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Password already set")
    )
)]
pub async fn set_password(
    State(state): State<AuthAppState>,
    ValidatedJson(request): ValidatedJson<SetPasswordRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let session = state
        .registration
        .set_password(&request.email, &request.password)
        .await?;

    Ok(Json(ApiResponse::success(session_response(
        session,
        state.token_expiration_hours,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/resend-otp",
    tag = "Authentication",
    request_body = ResendOtpRequest,
    responses(
        (status = 200, description = "New code dispatched", body = ApiResponse<MessageResponse>),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Account already active")
    )
)]
pub async fn resend_otp(
    State(state): State<AuthAppState>,
    ValidatedJson(request): ValidatedJson<ResendOtpRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.registration.resend_otp(&request.email).await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: format!("Verification code re-sent to {}", request.email),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<SessionResponse>),
        (status = 400, description = "Wrong credentials or unverified account"),
        (status = 401, description = "Account disabled"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn login(
    State(state): State<AuthAppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let session = state
        .registration
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(ApiResponse::success(session_response(
        session,
        state.token_expiration_hours,
    ))))
}
