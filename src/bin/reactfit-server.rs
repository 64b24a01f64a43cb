// ABOUTME: ReactFit server binary wiring configuration, database, and LLM provider
// ABOUTME: Starts the HTTP API serving the mobile fitness client
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # ReactFit API Server Binary
//!
//! Starts the ReactFit fitness API: user registration, water and diet
//! logging, and the AI coaching chat endpoint backed by Groq.

use anyhow::Result;
use clap::Parser;
use reactfit_server::{
    config::ServerConfig,
    database::Database,
    llm::{GroqProvider, LlmProvider},
    logging,
    server::{HttpServer, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "reactfit-server")]
#[command(about = "ReactFit API - fitness tracking and AI coaching for the ReactFit client")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle container environments where clap may not work properly
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using default configuration");
            Args { http_port: None }
        }
    };

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting ReactFit API server");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    database.migrate().await?;
    info!("Database initialized: {}", config.database_url);

    let llm = GroqProvider::from_env()?;
    info!("LLM provider ready: {}", llm.display_name());

    let resources = Arc::new(ServerResources::new(database, Arc::new(llm)));
    let server = HttpServer::new(resources);

    display_available_endpoints(config.http_port);

    if let Err(e) = server.run(config.http_port).await {
        error!("Server failed: {e}");
        return Err(e.into());
    }

    Ok(())
}

/// Print the endpoint map at startup
fn display_available_endpoints(port: u16) {
    info!("Available endpoints on port {port}:");
    info!("  POST /reactfit/v001/setupuser/         - register a user account");
    info!("  POST /reactfit/v001/chat/              - AI coaching chat");
    info!("  POST /reactfit/v001/addwaterintakelog/ - log water intake");
    info!("  POST /reactfit/v001/adddietlog/        - log a meal");
    info!("  GET  /health                           - liveness probe");
    info!("  GET  /ready                            - readiness probe");
}
