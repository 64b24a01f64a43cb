// ABOUTME: Water intake and diet logging route handlers
// ABOUTME: Parses client-formatted amounts ("500ml", "40g") and records daily logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Water and diet logging routes
//!
//! The mobile client sends amounts as display strings with unit suffixes.
//! Water amounts must parse; macro amounts fall back to zero so a single
//! malformed macro does not lose the whole meal entry.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::database::NewDietLog;
use crate::errors::AppError;
use crate::server::ServerResources;

use super::API_PREFIX;

/// Water log request payload
#[derive(Debug, Deserialize)]
pub struct WaterLogRequest {
    /// Identifier of the user logging water
    #[serde(rename = "userID", default)]
    pub user_id: Option<String>,
    /// Log entry with a display-formatted `amount` (e.g. "500ml")
    #[serde(default)]
    pub messages: Value,
}

/// Diet log request payload
#[derive(Debug, Deserialize)]
pub struct DietLogRequest {
    /// Identifier of the user logging a meal
    #[serde(rename = "userID", default)]
    pub user_id: Option<String>,
    /// Log entry with title, calories, macros, time, and period
    #[serde(default)]
    pub messages: Value,
}

/// Logging routes implementation
pub struct LogRoutes;

impl LogRoutes {
    /// Create the water and diet logging routes
    pub fn routes() -> Router<Arc<ServerResources>> {
        Router::new()
            .route(
                &format!("{API_PREFIX}/addwaterintakelog/"),
                post(Self::add_water_intake_log).fallback(super::method_not_allowed),
            )
            .route(
                &format!("{API_PREFIX}/adddietlog/"),
                post(Self::add_diet_log).fallback(super::method_not_allowed),
            )
    }

    /// Handle POST /reactfit/v001/addwaterintakelog/
    async fn add_water_intake_log(
        State(resources): State<Arc<ServerResources>>,
        body: axum::body::Bytes,
    ) -> Result<Response, AppError> {
        let request: WaterLogRequest =
            serde_json::from_slice(&body).map_err(|_| AppError::invalid_input("Invalid JSON"))?;

        let user_id = parse_user_id(request.user_id.as_deref())?;

        let amount_raw = request
            .messages
            .get("amount")
            .map_or_else(|| "0".to_owned(), value_to_string);
        let amount_ml = parse_amount_ml(&amount_raw)?;

        // Verify the user before touching the log table so an unknown id
        // surfaces as 404 rather than a foreign-key failure.
        if !resources.database.users().user_exists(user_id).await? {
            return Err(AppError::not_found("User"));
        }

        let record = resources.database.water().add_intake(user_id, amount_ml).await?;

        info!(user_id = %user_id, added_ml = record.added_ml, total_ml = record.total_ml, "Water log stored");

        Ok(Json(json!({
            "message": "Log stored successfully",
            "added_amount": record.added_ml,
            "total_today": record.total_ml,
            "date": record.date.to_string(),
        }))
        .into_response())
    }

    /// Handle POST /reactfit/v001/adddietlog/
    async fn add_diet_log(
        State(resources): State<Arc<ServerResources>>,
        body: axum::body::Bytes,
    ) -> Result<Response, AppError> {
        let request: DietLogRequest =
            serde_json::from_slice(&body).map_err(|_| AppError::invalid_input("Invalid JSON"))?;

        let user_id = parse_user_id(request.user_id.as_deref())?;

        if !resources.database.users().user_exists(user_id).await? {
            return Err(AppError::not_found("User"));
        }

        let entry = &request.messages;
        let field = |name: &str| entry.get(name).map(value_to_string).unwrap_or_default();

        let log = NewDietLog {
            title: entry
                .get("title")
                .map_or_else(|| "Unknown Meal".to_owned(), value_to_string),
            calories: parse_grams(&field("calories")),
            protein_g: parse_grams(&field("protein")),
            carbs_g: parse_grams(&field("carbs")),
            fat_g: parse_grams(&field("fat")),
            time: field("time"),
            period: field("period"),
        };

        let record = resources.database.diet().create_log(user_id, &log).await?;

        info!(user_id = %user_id, title = %record.title, calories = record.calories, "Diet log stored");

        Ok(Json(json!({
            "message": "Diet Log stored successfully",
            "id": record.id,
            "title": record.title,
            "calories": record.calories,
        }))
        .into_response())
    }
}

/// Require and parse the `userID` field
fn parse_user_id(raw: Option<&str>) -> Result<Uuid, AppError> {
    let raw = raw
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::missing_field("UserID is required"))?;

    Uuid::parse_str(raw.trim()).map_err(|_| AppError::invalid_input("Invalid user id format"))
}

/// Render a JSON scalar the way the client formatted it
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a water amount like "500ml", "500 ML", or "500"
///
/// Rejects anything that is not a non-negative whole number of
/// milliliters after the suffix is stripped.
fn parse_amount_ml(raw: &str) -> Result<i64, AppError> {
    let cleaned = raw.to_lowercase().replace("ml", "");
    let amount = cleaned
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::invalid_input("Invalid amount format"))?;

    if amount < 0 {
        return Err(AppError::invalid_input("Invalid amount format"));
    }

    Ok(amount)
}

/// Parse a macro amount like "40g", "40.5 g", or plain "40"
///
/// Lenient by contract: malformed values collapse to zero so the rest of
/// the meal entry is still recorded.
fn parse_grams(raw: &str) -> i64 {
    let cleaned = raw.to_lowercase().replace('g', "");
    cleaned
        .trim()
        .parse::<f64>()
        .map(|v| v as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_amount_ml_accepts_suffix_variants() {
        assert_eq!(parse_amount_ml("500ml").unwrap(), 500);
        assert_eq!(parse_amount_ml("500 ML").unwrap(), 500);
        assert_eq!(parse_amount_ml("500").unwrap(), 500);
        assert_eq!(parse_amount_ml(" 250ml ").unwrap(), 250);
    }

    #[test]
    fn test_parse_amount_ml_rejects_garbage_and_negatives() {
        assert!(parse_amount_ml("a lot").is_err());
        assert!(parse_amount_ml("").is_err());
        assert!(parse_amount_ml("-100ml").is_err());
        assert!(parse_amount_ml("1.5ml").is_err());
    }

    #[test]
    fn test_parse_grams_is_lenient() {
        assert_eq!(parse_grams("40g"), 40);
        assert_eq!(parse_grams("40.9 G"), 40);
        assert_eq!(parse_grams("40"), 40);
        assert_eq!(parse_grams("unknown"), 0);
        assert_eq!(parse_grams(""), 0);
    }

    #[test]
    fn test_parse_user_id_required() {
        let error = parse_user_id(None).unwrap_err();
        assert_eq!(error.message, "UserID is required");

        let error = parse_user_id(Some("   ")).unwrap_err();
        assert_eq!(error.message, "UserID is required");

        assert!(parse_user_id(Some("not-a-uuid")).is_err());

        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(Some(&id.to_string())).unwrap(), id);
    }

    #[test]
    fn test_value_to_string_handles_numbers() {
        assert_eq!(value_to_string(&serde_json::json!("500ml")), "500ml");
        assert_eq!(value_to_string(&serde_json::json!(500)), "500");
    }
}
