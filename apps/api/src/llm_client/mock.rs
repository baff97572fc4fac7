//! Test double for [`TextModel`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{LlmError, ModelInvocation, TextModel};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fault(String),
    Empty,
}

/// Mock model returning a canned reply, optionally after a delay.
/// Records every prompt it receives.
pub struct MockTextModel {
    reply: Reply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockTextModel {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    pub fn fault(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fault(message.into()))
    }

    pub fn empty() -> Self {
        Self::with_reply(Reply::Empty)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextModel for MockTextModel {
    async fn complete(&self, invocation: &ModelInvocation<'_>) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push(invocation.prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fault(message) => Err(LlmError::Invoke(message.clone())),
            Reply::Empty => Err(LlmError::EmptyContent),
        }
    }
}
