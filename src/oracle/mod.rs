//! Text oracle abstraction.
//!
//! The hosted generative model is treated as an opaque service: send a
//! prompt, get text back or an error. [`GeminiOracle`] talks to the real
//! service; [`MockOracle`] replays scripted replies for tests.

pub mod error;
pub mod gemini;

use std::collections::VecDeque;
use std::sync::Mutex;

pub use error::OracleError;
pub use gemini::GeminiOracle;

/// Prompt-in, text-out completion service.
#[allow(async_fn_in_trait)]
pub trait TextOracle {
    /// Sends `prompt` and returns the model's text reply.
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}

/// Scripted oracle that records prompts and replays queued replies.
///
/// Once the queue is empty every call fails with
/// [`OracleError::EmptyResponse`].
#[derive(Debug, Default)]
pub struct MockOracle {
    replies: Mutex<VecDeque<Result<String, OracleError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockOracle {
    /// Creates a mock with no queued replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that answers once with `text`.
    #[must_use]
    pub fn replying(text: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_reply(text);
        mock
    }

    /// Queues a successful reply.
    pub fn push_reply(&self, text: impl Into<String>) {
        self.lock_replies().push_back(Ok(text.into()));
    }

    /// Queues a failure.
    pub fn push_error(&self, error: OracleError) {
        self.lock_replies().push_back(Err(error));
    }

    /// All prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, OracleError>>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TextOracle for MockOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.lock_replies()
            .pop_front()
            .unwrap_or(Err(OracleError::EmptyResponse))
    }
}
