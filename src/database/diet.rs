// ABOUTME: Diet log persistence recording meals with calories and macros
// ABOUTME: Append-only log keyed by user and date
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meal and macro logging

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Input for recording a meal
#[derive(Debug, Clone)]
pub struct NewDietLog {
    /// Meal title (e.g. "Chicken and rice")
    pub title: String,
    /// Calories in kcal
    pub calories: i64,
    /// Protein in grams
    pub protein_g: i64,
    /// Carbohydrates in grams
    pub carbs_g: i64,
    /// Fat in grams
    pub fat_g: i64,
    /// Clock time of the meal (e.g. "08:30")
    pub time: String,
    /// "AM" or "PM"
    pub period: String,
}

/// Stored meal entry
#[derive(Debug, Clone)]
pub struct DietLogRecord {
    /// Row identifier
    pub id: i64,
    /// Meal title
    pub title: String,
    /// Calories in kcal
    pub calories: i64,
}

/// Diet log operations
pub struct DietLogManager {
    pool: SqlitePool,
}

impl DietLogManager {
    /// Create a manager backed by the given pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a meal for a user
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub async fn create_log(&self, user_id: Uuid, log: &NewDietLog) -> AppResult<DietLogRecord> {
        let now = Utc::now();

        let result = sqlx::query(
            r"INSERT INTO diet_logs (
                user_id, date, title, calories, protein_g, carbs_g, fat_g, time, period, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(user_id.to_string())
        .bind(now.date_naive().to_string())
        .bind(&log.title)
        .bind(log.calories)
        .bind(log.protein_g)
        .bind(log.carbs_g)
        .bind(log.fat_g)
        .bind(&log.time)
        .bind(&log.period)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record diet log: {e}")))?;

        let id = result.last_insert_rowid();

        info!(user_id = %user_id, title = %log.title, calories = log.calories, "Diet log recorded");

        Ok(DietLogRecord {
            id,
            title: log.title.clone(),
            calories: log.calories,
        })
    }
}
