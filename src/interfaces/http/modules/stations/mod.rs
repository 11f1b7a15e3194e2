//! Station module — directory surface for the booking engine

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
