//! HTTP inbound adapter exposing the relief coordination REST endpoints.

pub mod admin;
pub mod assignments;
pub mod auth;
pub mod disasters;
pub mod donations;
pub mod error;
pub mod health;
pub mod missions;
pub mod reports;
pub mod resource_requests;
pub mod resources;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod volunteers;

pub use crate::domain::ApiResult;
