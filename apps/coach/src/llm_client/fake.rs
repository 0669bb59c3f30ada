//! In-memory `CompletionService` for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{CompletionRequest, CompletionService, LlmError};

pub enum FakeReply {
    Text(String),
    ServerError,
}

#[derive(Default)]
pub struct FakeCompletionService {
    replies: Mutex<VecDeque<FakeReply>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl FakeCompletionService {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_replies(vec![FakeReply::Text(text.into())])
    }

    pub fn failing() -> Self {
        Self::with_replies(vec![FakeReply::ServerError])
    }

    pub fn with_replies(replies: Vec<FakeReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    /// Holds every call until the returned `Notify` is signalled.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for FakeCompletionService {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(FakeReply::Text(text)) => Ok(text),
            Some(FakeReply::ServerError) => Err(LlmError::Api {
                status: 500,
                message: "internal".to_string(),
            }),
            None => Err(LlmError::EmptyContent),
        }
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}
