//! Interface layer - transport adapters

pub mod http;
