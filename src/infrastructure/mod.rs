//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod memory;
pub mod notify;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use memory::InMemoryRepositoryProvider;
pub use notify::{LogOtpSink, OtpSink};
