// ABOUTME: Route module organization for ReactFit server HTTP endpoints
// ABOUTME: Centralizes route definitions by domain with thin handlers over service layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route module for the ReactFit server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the coach pipeline or the database layer.
//! All endpoints live under the `/reactfit/v001/` prefix the mobile
//! client expects.

/// AI coaching chat routes
pub mod chat;
/// Health check and system status routes
pub mod health;
/// Water intake and diet logging routes
pub mod logs;
/// User registration routes
pub mod users;

pub use chat::ChatRoutes;
pub use health::HealthRoutes;
pub use logs::LogRoutes;
pub use users::UserRoutes;

/// URL prefix shared by every client-facing endpoint
pub const API_PREFIX: &str = "/reactfit/v001";

/// Shared fallback for unsupported HTTP methods on client-facing routes
///
/// Registered as the method-router fallback so any verb other than the
/// declared one returns `{"message": "Method not allowed"}` with 405.
pub async fn method_not_allowed() -> crate::errors::AppError {
    crate::errors::AppError::method_not_allowed()
}
