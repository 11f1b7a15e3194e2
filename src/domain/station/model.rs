//! Charging station domain entity

use chrono::{DateTime, NaiveTime, Utc};

use crate::shared::time::is_within_window;

/// Charging station with bookable slots.
///
/// `available_slots` is the contended resource of the whole system;
/// it is mutated only through the reservation engine's atomic
/// decrement/increment, never by read endpoints.
#[derive(Debug, Clone)]
pub struct Station {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    /// Remaining bookable slots, never negative
    pub available_slots: i32,
    /// Booking price per hour, minor currency units
    pub rate_per_hour: i32,
    /// Owning company, if any
    pub company_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Station {
    /// Whether the station accepts bookings at the given time of day.
    pub fn is_open_at(&self, now: NaiveTime) -> bool {
        is_within_window(self.opening_time, self.closing_time, now)
    }

    pub fn is_open_now(&self) -> bool {
        self.is_open_at(Utc::now().time())
    }
}

/// Station creation payload (id assigned by the store).
#[derive(Debug, Clone)]
pub struct NewStation {
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub available_slots: i32,
    pub rate_per_hour: i32,
    pub company_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_station() -> Station {
        Station {
            id: 1,
            name: "Central".into(),
            address: "1 Main St".into(),
            latitude: Some(41.31),
            longitude: Some(69.24),
            phone: None,
            opening_time: t(6, 0),
            closing_time: t(22, 0),
            available_slots: 4,
            rate_per_hour: 5000,
            company_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn open_within_hours() {
        let s = sample_station();
        assert!(s.is_open_at(t(10, 0)));
        assert!(!s.is_open_at(t(23, 0)));
    }

    #[test]
    fn overnight_hours_wrap() {
        let mut s = sample_station();
        s.opening_time = t(22, 0);
        s.closing_time = t(6, 0);
        assert!(s.is_open_at(t(23, 0)));
        assert!(s.is_open_at(t(5, 0)));
        assert!(!s.is_open_at(t(12, 0)));
    }
}
