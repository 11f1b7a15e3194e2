//! Booking HTTP handlers
//!
//! Reservation works for guests too; when a valid bearer token is
//! present the booking is bound to the account.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{BookingDto, CreateBookingRequest};
use crate::application::services::{ReservationService, ReserveRequest};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedAccount;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub reservations: Arc<ReservationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Slot reserved", body = ApiResponse<BookingDto>),
        (status = 404, description = "Station not found"),
        (status = 409, description = "Station closed or out of capacity"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    account: Option<Extension<AuthenticatedAccount>>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let booking = state
        .reservations
        .reserve(ReserveRequest {
            account_id: account.map(|Extension(a)| a.account_id),
            station_id: request.station_id,
            phone: request.phone,
            car_number: request.car_number,
            hours: request.hours,
            slots: request.slots,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from(booking))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/cancel",
    tag = "Bookings",
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled, slots released", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already confirmed or cancelled")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state.reservations.cancel(booking_id).await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state.reservations.get(booking_id).await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<Vec<BookingDto>>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let bookings = state.reservations.list().await?;
    let dtos = bookings.into_iter().map(BookingDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}
