// ABOUTME: SQLite database connection management and schema migration
// ABOUTME: Exposes per-table managers for users, water intake, and diet logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Layer
//!
//! SQLite-backed persistence for the ReactFit server. A single
//! [`Database`] owns the connection pool; table-specific operations live
//! in the manager types returned by [`Database::users`],
//! [`Database::water`], and [`Database::diet`].

mod diet;
mod users;
mod water;

pub use diet::{DietLogManager, DietLogRecord, NewDietLog};
pub use users::{NewUser, UserManager, UserRecord};
pub use water::{WaterIntakeManager, WaterIntakeRecord, DEFAULT_DAILY_GOAL_ML};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Table creation statements, applied idempotently at startup
const SCHEMA_STATEMENTS: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS app_users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'APP_USER',
        first_name TEXT NOT NULL DEFAULT '',
        last_name TEXT NOT NULL DEFAULT '',
        gender TEXT NOT NULL DEFAULT 'M',
        country TEXT NOT NULL DEFAULT 'India',
        age INTEGER,
        height REAL,
        weight REAL,
        activity_level TEXT NOT NULL DEFAULT 'moderate',
        primary_goal TEXT NOT NULL DEFAULT '',
        protocol TEXT NOT NULL DEFAULT 'Generate',
        created_at TEXT NOT NULL
    )",
    r"CREATE TABLE IF NOT EXISTS water_intake (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL REFERENCES app_users(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        current_intake_ml INTEGER NOT NULL DEFAULT 0,
        daily_goal_ml INTEGER NOT NULL DEFAULT 3000,
        last_updated TEXT NOT NULL,
        UNIQUE(user_id, date)
    )",
    r"CREATE TABLE IF NOT EXISTS diet_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL REFERENCES app_users(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        title TEXT NOT NULL,
        calories INTEGER NOT NULL DEFAULT 0,
        protein_g INTEGER NOT NULL DEFAULT 0,
        carbs_g INTEGER NOT NULL DEFAULT 0,
        fat_g INTEGER NOT NULL DEFAULT 0,
        time TEXT NOT NULL DEFAULT '',
        period TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL
    )",
];

/// SQLite database handle
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if necessary) the database at the given URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the pool cannot connect.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true);

        // In-memory databases exist per-connection; a pool larger than one
        // would see independent empty databases.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Apply the schema, creating any missing tables
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails to execute.
    pub async fn migrate(&self) -> AppResult<()> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Schema migration failed: {e}")))?;
        }

        info!(tables = SCHEMA_STATEMENTS.len(), "Database schema ready");
        Ok(())
    }

    /// User account operations
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Water intake tracking operations
    #[must_use]
    pub fn water(&self) -> WaterIntakeManager {
        WaterIntakeManager::new(self.pool.clone())
    }

    /// Diet log operations
    #[must_use]
    pub fn diet(&self) -> DietLogManager {
        DietLogManager::new(self.pool.clone())
    }

    /// Check database connectivity
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}
