// ABOUTME: Scripted LLM provider test double recording requests for assertions
// ABOUTME: Replies with a fixed string or fails on demand without network access

use async_trait::async_trait;
use std::sync::Mutex;

use reactfit_server::errors::AppError;
use reactfit_server::llm::{ChatRequest, ChatResponse, LlmProvider};

/// Scripted provider: returns a configured reply or a configured failure,
/// and records the last request it saw.
pub struct MockLlmProvider {
    reply: String,
    fail: bool,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockLlmProvider {
    /// Provider that always answers with `reply`
    #[allow(dead_code)]
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_owned(),
            fail: false,
            last_request: Mutex::new(None),
        }
    }

    /// Provider whose completion call always fails
    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            last_request: Mutex::new(None),
        }
    }

    /// The most recent request submitted to the provider
    #[allow(dead_code)]
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Scripted test provider"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        *self.last_request.lock().expect("mock lock poisoned") = Some(request.clone());

        if self.fail {
            return Err(AppError::external_service("mock", "scripted failure"));
        }

        Ok(ChatResponse {
            content: self.reply.clone(),
            model: "mock-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(!self.fail)
    }
}
