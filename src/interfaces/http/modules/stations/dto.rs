//! Station DTOs

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::station::{NewStation, Station};
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStationRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "address is required"))]
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    /// "HH:MM" or "HH:MM:SS"
    pub opening_time: String,
    /// "HH:MM" or "HH:MM:SS"; equal to opening_time means open 24h
    pub closing_time: String,
    #[validate(range(min = 0, message = "available_slots must not be negative"))]
    pub available_slots: i32,
    #[validate(range(min = 0, message = "rate_per_hour must not be negative"))]
    pub rate_per_hour: i32,
    /// Create and attach an owning company in the same call
    pub company: Option<CompanyInput>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompanyInput {
    #[validate(length(min = 1, max = 100, message = "company name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub contact_email: Option<String>,
}

fn parse_time(value: &str, field: &str) -> DomainResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| DomainError::Validation(format!("{}: expected HH:MM, got '{}'", field, value)))
}

impl CreateStationRequest {
    /// Parse the time window; `company_id` is attached by the handler.
    pub fn into_new_station(self, company_id: Option<i32>) -> DomainResult<NewStation> {
        Ok(NewStation {
            opening_time: parse_time(&self.opening_time, "opening_time")?,
            closing_time: parse_time(&self.closing_time, "closing_time")?,
            name: self.name,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            phone: self.phone,
            available_slots: self.available_slots,
            rate_per_hour: self.rate_per_hour,
            company_id,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StationDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub opening_time: String,
    pub closing_time: String,
    pub available_slots: i32,
    pub rate_per_hour: i32,
    pub company_id: Option<i32>,
    /// Whether the station accepts bookings right now
    pub open_now: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Station> for StationDto {
    fn from(s: Station) -> Self {
        Self {
            id: s.id,
            open_now: s.is_open_now(),
            opening_time: s.opening_time.format("%H:%M").to_string(),
            closing_time: s.closing_time.format("%H:%M").to_string(),
            name: s.name,
            address: s.address,
            latitude: s.latitude,
            longitude: s.longitude,
            phone: s.phone,
            available_slots: s.available_slots,
            rate_per_hour: s.rate_per_hour,
            company_id: s.company_id,
            created_at: s.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateStationRequest {
        CreateStationRequest {
            name: "Central".into(),
            address: "1 Main St".into(),
            latitude: None,
            longitude: None,
            phone: None,
            opening_time: "06:00".into(),
            closing_time: "22:00:00".into(),
            available_slots: 4,
            rate_per_hour: 5000,
            company: None,
        }
    }

    #[test]
    fn parses_both_time_formats() {
        let station = request().into_new_station(None).unwrap();
        assert_eq!(station.opening_time.format("%H:%M").to_string(), "06:00");
        assert_eq!(station.closing_time.format("%H:%M").to_string(), "22:00");
    }

    #[test]
    fn rejects_garbage_times() {
        let mut bad = request();
        bad.opening_time = "sunrise".into();
        let err = bad.into_new_station(None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
