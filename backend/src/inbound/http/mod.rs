//! HTTP inbound adapter exposing the course REST endpoints.

pub mod courses;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::{ApiResult, json_config, not_found};
