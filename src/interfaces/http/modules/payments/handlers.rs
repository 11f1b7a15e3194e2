//! Payment HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{ConfirmPaymentRequest, PaymentDto};
use crate::application::services::PaymentService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

/// Application state for payment handlers.
#[derive(Clone)]
pub struct PaymentAppState {
    pub payments: Arc<PaymentService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/confirm",
    tag = "Payments",
    request_body = ConfirmPaymentRequest,
    responses(
        (status = 201, description = "Payment recorded, booking confirmed", body = ApiResponse<PaymentDto>),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Already paid or booking cancelled"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn confirm_payment(
    State(state): State<PaymentAppState>,
    ValidatedJson(request): ValidatedJson<ConfirmPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentDto>>), ApiError> {
    let payment = state
        .payments
        .confirm(request.booking_id, request.amount)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PaymentDto::from(payment))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/by-booking/{booking_id}",
    tag = "Payments",
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Payment for the booking", body = ApiResponse<PaymentDto>),
        (status = 404, description = "No payment recorded")
    )
)]
pub async fn get_payment_by_booking(
    State(state): State<PaymentAppState>,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<PaymentDto>>, ApiError> {
    let payment = state
        .payments
        .find_by_booking(booking_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Payment",
            field: "booking_id",
            value: booking_id.to_string(),
        })?;

    Ok(Json(ApiResponse::success(PaymentDto::from(payment))))
}
