// ABOUTME: Chat route handler running the AI coaching pipeline
// ABOUTME: Accepts conversation history and returns a single coach reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat route for AI coaching conversations
//!
//! The endpoint is open access: the client carries no credentials, and the
//! user's identity arrives embedded in the message text. Success and every
//! failure path return a JSON object with a single `message` field.

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::coach;
use crate::errors::AppError;
use crate::llm::ChatMessage;
use crate::server::ServerResources;

use super::API_PREFIX;

/// Chat request body: the full conversation history, most recent last
#[derive(Debug, Deserialize)]
pub struct ChatHistoryRequest {
    /// Ordered conversation messages
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Successful chat response
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    /// The coach's reply text
    pub message: String,
}

/// Chat routes implementation
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create the chat route
    pub fn routes() -> Router<Arc<ServerResources>> {
        Router::new().route(
            &format!("{API_PREFIX}/chat/"),
            post(Self::continue_chat).fallback(super::method_not_allowed),
        )
    }

    /// Handle POST /reactfit/v001/chat/
    ///
    /// The body is read raw and parsed manually so a malformed payload
    /// maps to the exact `{"message": "Invalid JSON"}` contract instead
    /// of the default extractor rejection.
    async fn continue_chat(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let request: ChatHistoryRequest = serde_json::from_slice(&body)
            .map_err(|_| AppError::invalid_input("Invalid JSON"))?;

        let reply = coach::dispatch_chat(resources.llm.as_ref(), &request.messages).await?;

        info!(
            history_len = request.messages.len(),
            reply_chars = reply.len(),
            "Chat completion served"
        );

        Ok(Json(ChatReply { message: reply }).into_response())
    }
}
