//! Station HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{CreateStationRequest, StationDto};
use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

/// Application state for station handlers.
#[derive(Clone)]
pub struct StationAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    post,
    path = "/api/v1/stations",
    tag = "Stations",
    security(("bearer_auth" = [])),
    request_body = CreateStationRequest,
    responses(
        (status = 201, description = "Station created", body = ApiResponse<StationDto>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin only"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_station(
    State(state): State<StationAppState>,
    ValidatedJson(request): ValidatedJson<CreateStationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StationDto>>), ApiError> {
    let company_id = match &request.company {
        Some(company) => Some(
            state
                .repos
                .stations()
                .create_company(company.name.clone(), company.contact_email.clone())
                .await?,
        ),
        None => None,
    };

    let station = state
        .repos
        .stations()
        .create(request.into_new_station(company_id)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(StationDto::from(station))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/stations",
    tag = "Stations",
    responses(
        (status = 200, description = "All stations", body = ApiResponse<Vec<StationDto>>)
    )
)]
pub async fn list_stations(
    State(state): State<StationAppState>,
) -> Result<Json<ApiResponse<Vec<StationDto>>>, ApiError> {
    let stations = state.repos.stations().find_all().await?;
    let dtos = stations.into_iter().map(StationDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stations/{station_id}",
    tag = "Stations",
    params(("station_id" = i32, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station details", body = ApiResponse<StationDto>),
        (status = 404, description = "Station not found")
    )
)]
pub async fn get_station(
    State(state): State<StationAppState>,
    Path(station_id): Path<i32>,
) -> Result<Json<ApiResponse<StationDto>>, ApiError> {
    let station = state
        .repos
        .stations()
        .find_by_id(station_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Station",
            field: "id",
            value: station_id.to_string(),
        })?;

    Ok(Json(ApiResponse::success(StationDto::from(station))))
}
