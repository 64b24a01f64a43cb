// ABOUTME: AI coaching pipeline assembling context, prompt, and completion calls
// ABOUTME: Ties together extraction, instruction building, and LLM dispatch per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # ReactFit Coaching Pipeline
//!
//! The chat endpoint runs each request through three stages:
//!
//! 1. **Context extraction** ([`extract_user_context`]): parse live stats
//!    from the last message of the conversation.
//! 2. **Prompt building** ([`build_system_instruction`]): merge the stats
//!    (or defaults) into the coach persona template.
//! 3. **Dispatch** ([`dispatch_chat`]): prepend the instruction as a system
//!    message and submit the conversation to the configured provider.
//!
//! Everything here is per-request and stateless; nothing survives the call.

mod context;
mod prompt;

pub use context::{extract_user_context, ExtractedContext};
pub use prompt::{build_system_instruction, UserProfile};

use tracing::{debug, instrument};

use crate::errors::{AppError, AppResult};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Model used for coaching completions
pub const CHAT_MODEL: &str = "llama-3.1-8b-instant";

/// Sampling temperature for coaching completions
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Maximum tokens per coaching reply
pub const CHAT_MAX_TOKENS: u32 = 600;

/// Assemble the outgoing message sequence for a completion call
///
/// Exactly one system message goes at index 0; the caller's history follows
/// unchanged in its original order.
#[must_use]
pub fn assemble_messages(instruction: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(instruction));
    messages.extend_from_slice(history);
    messages
}

/// Run the full coaching pipeline for one conversation
///
/// Extracts context from the history, builds the system instruction, and
/// submits the assembled sequence to the provider. Returns the first
/// completion's text.
///
/// # Errors
///
/// Returns an error when the provider call fails; the HTTP layer maps it
/// to a generic server error.
#[instrument(skip(provider, history), fields(provider = provider.name(), history_len = history.len()))]
pub async fn dispatch_chat(
    provider: &dyn LlmProvider,
    history: &[ChatMessage],
) -> AppResult<String> {
    let profile = extract_user_context(history).map_or_else(UserProfile::default, UserProfile::from);
    let instruction = build_system_instruction(&profile);

    let messages = assemble_messages(&instruction, history);

    debug!(
        messages = messages.len(),
        model = CHAT_MODEL,
        "Dispatching coaching completion"
    );

    let request = ChatRequest::new(messages)
        .with_model(CHAT_MODEL)
        .with_temperature(CHAT_TEMPERATURE)
        .with_max_tokens(CHAT_MAX_TOKENS);

    let response = provider.complete(&request).await.map_err(|e| {
        // Keep the upstream detail in the error chain for logging; the
        // response body the caller sees stays generic.
        AppError::external_service("chat completion", "provider call failed").with_source(e)
    })?;

    Ok(response.content)
}
