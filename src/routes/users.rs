// ABOUTME: User registration route handler for account setup
// ABOUTME: Validates the registration payload, hashes the password, and stores the profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User registration route
//!
//! Field names on the wire are camelCase to match the mobile client.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::database::NewUser;
use crate::errors::AppError;
use crate::models::{ActivityLevel, Gender, Role};
use crate::server::ServerResources;

use super::API_PREFIX;

/// Registration request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    /// Account role
    #[serde(default)]
    pub role: Role,
    /// Height in centimeters
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    /// Age in years
    #[serde(default)]
    pub age: Option<i64>,
    /// Gender
    #[serde(default)]
    pub gender: Gender,
    /// Country of residence
    #[serde(default = "default_country")]
    pub country: String,
    /// Self-reported activity level
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Main fitness objective
    #[serde(default)]
    pub primary_goal: String,
    /// Coaching protocol selector
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

fn default_country() -> String {
    "India".to_owned()
}

fn default_protocol() -> String {
    "Generate".to_owned()
}

/// Successful registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,
    /// Identifier of the created account
    pub user_id: Uuid,
}

/// User registration routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create the registration route
    pub fn routes() -> Router<Arc<ServerResources>> {
        Router::new().route(
            &format!("{API_PREFIX}/setupuser/"),
            post(Self::setup_user).fallback(super::method_not_allowed),
        )
    }

    /// Handle POST /reactfit/v001/setupuser/
    async fn setup_user(
        State(resources): State<Arc<ServerResources>>,
        body: axum::body::Bytes,
    ) -> Result<Response, AppError> {
        let request: RegisterRequest =
            serde_json::from_slice(&body).map_err(|_| AppError::invalid_input("Invalid JSON"))?;

        if request.username.trim().is_empty() {
            return Err(AppError::missing_field("username is required"));
        }
        if request.email.trim().is_empty() {
            return Err(AppError::missing_field("email is required"));
        }
        if request.password.is_empty() {
            return Err(AppError::missing_field("password is required"));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let new_user = NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role: request.role,
            first_name: request.first_name,
            last_name: request.last_name,
            gender: request.gender,
            country: request.country,
            age: request.age,
            height: request.height,
            weight: request.weight,
            activity_level: request.activity_level,
            primary_goal: request.primary_goal,
            protocol: request.protocol,
        };

        let user_id = resources.database.users().create_user(&new_user).await?;

        info!(user_id = %user_id, "User registered");

        Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                message: "User created".to_owned(),
                user_id,
            }),
        )
            .into_response())
    }
}
