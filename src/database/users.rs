// ABOUTME: User account database operations for registration and lookup
// ABOUTME: Stores profile biometrics and AI coaching context alongside credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User account persistence

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, Gender, Role};

/// Input for creating a user account
///
/// `password_hash` is the bcrypt hash; plaintext passwords never reach
/// this layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Bcrypt password hash
    pub password_hash: String,
    /// Account role
    pub role: Role,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Gender
    pub gender: Gender,
    /// Country of residence
    pub country: String,
    /// Age in years
    pub age: Option<i64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Self-reported activity level
    pub activity_level: ActivityLevel,
    /// Main fitness objective (e.g. "Hypertrophy", "Marathon")
    pub primary_goal: String,
    /// Coaching protocol selector
    pub protocol: String,
}

/// Stored user account
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Account identifier
    pub id: Uuid,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Main fitness objective
    pub primary_goal: String,
}

/// User account operations
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a manager backed by the given pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user account, returning its generated id
    ///
    /// # Errors
    ///
    /// Returns an already-exists error when the username or email is
    /// taken, or a database error on other failures.
    pub async fn create_user(&self, user: &NewUser) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let created_at = Utc::now().to_rfc3339();

        sqlx::query(
            r"INSERT INTO app_users (
                id, username, email, password_hash, role,
                first_name, last_name, gender, country,
                age, height, weight, activity_level, primary_goal, protocol,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        )
        .bind(id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.gender.as_str())
        .bind(&user.country)
        .bind(user.age)
        .bind(user.height)
        .bind(user.weight)
        .bind(user.activity_level.as_str())
        .bind(&user.primary_goal)
        .bind(&user.protocol)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                AppError::already_exists("A user with this username or email already exists")
            } else {
                AppError::database(format!("Failed to create user: {e}"))
            }
        })?;

        info!(user_id = %id, username = %user.username, "User account created");

        Ok(id)
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no user has the given id, or a
    /// database error on other failures.
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<UserRecord> {
        let row = sqlx::query(
            "SELECT id, username, email, first_name, primary_goal FROM app_users WHERE id = ?1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query user: {e}")))?
        .ok_or_else(|| AppError::not_found("User"))?;

        let id_text: String = row.get("id");
        let id = Uuid::parse_str(&id_text)
            .map_err(|e| AppError::database(format!("Corrupt user id in database: {e}")))?;

        Ok(UserRecord {
            id,
            username: row.get("username"),
            email: row.get("email"),
            first_name: row.get("first_name"),
            primary_goal: row.get("primary_goal"),
        })
    }

    /// Check whether a user exists
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn user_exists(&self, user_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM app_users WHERE id = ?1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query user: {e}")))?;

        Ok(row.is_some())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::database::Database;
    use crate::errors::ErrorCode;

    fn sample_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: "$2b$12$fakehashfortestingonly".to_owned(),
            role: Role::AppUser,
            first_name: "Sam".to_owned(),
            last_name: "Lee".to_owned(),
            gender: Gender::Male,
            country: "India".to_owned(),
            age: Some(28),
            height: Some(180.0),
            weight: Some(80.0),
            activity_level: ActivityLevel::Moderate,
            primary_goal: "Hypertrophy".to_owned(),
            protocol: "Generate".to_owned(),
        }
    }

    async fn test_db() -> Database {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let db = test_db().await;
        let users = db.users();

        let id = users.create_user(&sample_user("sam", "sam@example.com")).await.unwrap();
        let record = users.get_user(id).await.unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.username, "sam");
        assert_eq!(record.first_name, "Sam");
        assert_eq!(record.primary_goal, "Hypertrophy");
        assert!(users.user_exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = test_db().await;
        let users = db.users();

        users.create_user(&sample_user("sam", "sam@example.com")).await.unwrap();
        let error = users
            .create_user(&sample_user("sam", "other@example.com"))
            .await
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
        assert_eq!(error.http_status(), 400);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let db = test_db().await;
        let users = db.users();

        let error = users.get_user(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert!(!users.user_exists(Uuid::new_v4()).await.unwrap());
    }
}
