// ABOUTME: Water intake tracking with one accumulating record per user per day
// ABOUTME: Upserts daily totals so repeated logs add to the running count
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily water intake persistence

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Default daily water goal in milliliters
pub const DEFAULT_DAILY_GOAL_ML: i64 = 3000;

/// One day's water intake state after an update
#[derive(Debug, Clone)]
pub struct WaterIntakeRecord {
    /// Amount added by the most recent log
    pub added_ml: i64,
    /// Running total for the day
    pub total_ml: i64,
    /// Daily goal
    pub goal_ml: i64,
    /// The day the record covers
    pub date: NaiveDate,
}

/// Water intake tracking operations
pub struct WaterIntakeManager {
    pool: SqlitePool,
}

impl WaterIntakeManager {
    /// Create a manager backed by the given pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add water to today's running total for a user
    ///
    /// Creates today's record on first log; subsequent logs accumulate.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the user does not exist, or a
    /// database error on other failures.
    pub async fn add_intake(&self, user_id: Uuid, amount_ml: i64) -> AppResult<WaterIntakeRecord> {
        let now = Utc::now();
        let today = now.date_naive();

        sqlx::query(
            r"INSERT INTO water_intake (user_id, date, current_intake_ml, daily_goal_ml, last_updated)
              VALUES (?1, ?2, ?3, ?4, ?5)
              ON CONFLICT(user_id, date)
              DO UPDATE SET current_intake_ml = current_intake_ml + ?3, last_updated = ?5",
        )
        .bind(user_id.to_string())
        .bind(today.to_string())
        .bind(amount_ml)
        .bind(DEFAULT_DAILY_GOAL_ML)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record water intake: {e}")))?;

        let row = sqlx::query(
            "SELECT current_intake_ml, daily_goal_ml FROM water_intake WHERE user_id = ?1 AND date = ?2",
        )
        .bind(user_id.to_string())
        .bind(today.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read water intake: {e}")))?;

        let total_ml: i64 = row.get("current_intake_ml");
        let goal_ml: i64 = row.get("daily_goal_ml");

        info!(user_id = %user_id, added_ml = amount_ml, total_ml, "Water intake recorded");

        Ok(WaterIntakeRecord {
            added_ml: amount_ml,
            total_ml,
            goal_ml,
            date: today,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::database::{Database, NewUser};
    use crate::models::{ActivityLevel, Gender, Role};

    async fn db_with_user() -> (Database, Uuid) {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let id = db
            .users()
            .create_user(&NewUser {
                username: "sam".to_owned(),
                email: "sam@example.com".to_owned(),
                password_hash: "$2b$12$fakehashfortestingonly".to_owned(),
                role: Role::AppUser,
                first_name: "Sam".to_owned(),
                last_name: "Lee".to_owned(),
                gender: Gender::Male,
                country: "India".to_owned(),
                age: None,
                height: None,
                weight: None,
                activity_level: ActivityLevel::Moderate,
                primary_goal: "Hypertrophy".to_owned(),
                protocol: "Generate".to_owned(),
            })
            .await
            .unwrap();

        (db, id)
    }

    #[tokio::test]
    async fn test_first_log_creates_daily_record() {
        let (db, user_id) = db_with_user().await;

        let record = db.water().add_intake(user_id, 500).await.unwrap();
        assert_eq!(record.added_ml, 500);
        assert_eq!(record.total_ml, 500);
        assert_eq!(record.goal_ml, DEFAULT_DAILY_GOAL_ML);
    }

    #[tokio::test]
    async fn test_repeated_logs_accumulate() {
        let (db, user_id) = db_with_user().await;
        let water = db.water();

        water.add_intake(user_id, 500).await.unwrap();
        water.add_intake(user_id, 300).await.unwrap();
        let record = water.add_intake(user_id, 200).await.unwrap();

        assert_eq!(record.added_ml, 200);
        assert_eq!(record.total_ml, 1000);
    }
}
