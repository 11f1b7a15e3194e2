//! Station repository interface
//!
//! Capacity is intentionally absent here: slot decrements/increments
//! happen only inside the booking repository's atomic operations.

use async_trait::async_trait;

use super::model::{NewStation, Station};
use crate::domain::DomainResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Create a station (admin action); the store assigns the id
    async fn create(&self, station: NewStation) -> DomainResult<Station>;

    /// Find station by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Station>>;

    /// List all stations
    async fn find_all(&self) -> DomainResult<Vec<Station>>;

    /// Create an owning company and return its id. Companies have no
    /// surface of their own; this exists for the station create path.
    async fn create_company(
        &self,
        name: String,
        contact_email: Option<String>,
    ) -> DomainResult<i32>;
}
