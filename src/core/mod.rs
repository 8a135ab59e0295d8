//! Aggregation services and shared helpers.

pub mod services;
pub mod utils;
