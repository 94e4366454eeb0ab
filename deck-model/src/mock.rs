use crate::error::{ModelError, Result};
use crate::llm::Llm;
use crate::types::{LlmRequest, LlmResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted outcome for [`MockLlm`]
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    /// A reply with no content, as when the model refuses
    Empty,
    Error(String),
}

/// Scripted backend for tests: replies are served in order, then the
/// fallback (if any) repeats forever. Every request is recorded.
pub struct MockLlm {
    name: String,
    script: Mutex<VecDeque<MockReply>>,
    fallback: Option<MockReply>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(self, reply: MockReply) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(reply);
        }
        self
    }

    pub fn with_json(self, value: Value) -> Self {
        self.with_reply(MockReply::Text(value.to_string()))
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.with_reply(MockReply::Error(message.into()))
    }

    /// Reply used once the script runs out
    pub fn repeating(mut self, reply: MockReply) -> Self {
        self.fallback = Some(reply);
        self
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match next.or_else(|| self.fallback.clone()) {
            Some(MockReply::Text(text)) => Ok(LlmResponse::text(text)),
            Some(MockReply::Empty) => Ok(LlmResponse::default()),
            Some(MockReply::Error(message)) => Err(ModelError::Model(message)),
            None => Err(ModelError::Model(format!("mock '{}' has no scripted reply", self.name))),
        }
    }
}
