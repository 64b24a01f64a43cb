// ABOUTME: Common data models and wire enums for user profiles
// ABOUTME: Serde wire names match the original mobile client contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain enums shared across registration and persistence
//!
//! Wire names (`APP_USER`, `M`, `moderate`, ...) are part of the client
//! contract and are stored verbatim in the database.

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Project administrator
    #[serde(rename = "ADMIN")]
    Admin,
    /// Regular application user
    #[default]
    #[serde(rename = "APP_USER")]
    AppUser,
}

impl Role {
    /// Wire/database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::AppUser => "APP_USER",
        }
    }
}

/// User gender
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    #[default]
    #[serde(rename = "M")]
    Male,
    /// Female
    #[serde(rename = "F")]
    Female,
    /// Other
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    /// Wire/database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }
}

/// Self-reported activity level, used for AI coaching context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Sedentary
    Sedentary,
    /// Lightly active
    Light,
    /// Moderately active
    #[default]
    Moderate,
    /// Very active
    Very,
    /// Extremely active
    Extreme,
}

impl ActivityLevel {
    /// Wire/database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Very => "very",
            Self::Extreme => "extreme",
        }
    }
}
