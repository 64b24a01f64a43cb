// ABOUTME: Main library entry point for the ReactFit fitness backend
// ABOUTME: Provides REST endpoints for user profiles, daily logs, and an AI chat coach
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # ReactFit Server
//!
//! A fitness-tracking backend: user registration with biometric profile,
//! daily water-intake and diet logging, and an AI chat coach. The coach
//! reads live user context embedded in the most recent chat message,
//! injects it into a system prompt, and forwards the conversation to an
//! external chat-completion API.
//!
//! ## Architecture
//!
//! - **Coach**: context extraction, prompt assembly, and dispatch to the LLM
//! - **LLM**: provider abstraction with a Groq implementation
//! - **Database**: SQLite persistence for users and daily logs
//! - **Routes**: HTTP handlers under `/reactfit/v001`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use reactfit_server::config::ServerConfig;
//! use reactfit_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("ReactFit server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// AI coach pipeline: context extraction, prompt building, chat dispatch
pub mod coach;

/// Configuration management from environment variables
pub mod config;

/// SQLite persistence for users and daily logs
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// LLM provider abstraction for AI chat integration
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models and wire enums
pub mod models;

/// `HTTP` routes for registration, daily logs, and chat
pub mod routes;

/// Shared server resources and router assembly
pub mod server;
