//! Station aggregate: model and repository interface

pub mod model;
pub mod repository;

pub use model::{NewStation, Station};
pub use repository::StationRepository;
