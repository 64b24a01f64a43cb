// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the axum request harness, the scripted LLM, and app construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)] // not every test crate uses every helper

pub mod axum_test;
pub mod mock_llm;

use std::sync::Arc;

use reactfit_server::database::Database;
use reactfit_server::server::{HttpServer, ServerResources};

use self::mock_llm::MockLlmProvider;

/// Build a full application router over an in-memory database and the
/// given scripted provider. Returns the router and the database for
/// direct seeding and assertions.
#[allow(dead_code)]
pub async fn test_app(llm: Arc<MockLlmProvider>) -> (axum::Router, Database) {
    let database = Database::new("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    database.migrate().await.expect("Failed to migrate schema");

    let resources = Arc::new(ServerResources::new(database.clone(), llm));
    let router = HttpServer::new(resources).router();

    (router, database)
}
