//! Account aggregate: model and repository interface

pub mod model;
pub mod repository;

pub use model::{Account, AccountRole};
pub use repository::AccountRepository;
