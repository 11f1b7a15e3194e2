//! EVSlot Booking Service
//!
//! A reservation backend for EV charging stations: OTP-gated account
//! registration, a station directory with open-hours and slot capacity,
//! concurrency-safe slot booking and an idempotent payment gate that
//! confirms bookings.
//!
//! # Architecture
//!
//! - `domain`: entities, status machines and repository interfaces
//! - `application`: use-case services and background tasks
//! - `infrastructure`: SeaORM persistence, in-memory storage, crypto, OTP delivery
//! - `interfaces`: the axum REST API with Swagger docs
//! - `shared`: time helpers and graceful shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::create_api_router;
pub use shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
