use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream;

use crate::application::{ChatClient, FragmentStream, ImageClient};
use crate::domain::{ChatResult, GatewayError, ImageReference, TokenUsage, Turn};

const MOCK_MODEL: &str = "mock/echo-1";

/// Deterministic offline [`ChatClient`] for tests and `--mock` runs.
///
/// Echoes the last user turn unless a fixed reply was configured; the
/// streaming path yields the same text split into word fragments. Records
/// the message list of the most recent call so tests can assert on the
/// composed request.
pub struct MockChatClient {
    reply: Option<String>,
    fail: bool,
    last: Mutex<Vec<Turn>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            reply: None,
            fail: false,
            last: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `reply` instead of echoing.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::new()
        }
    }

    /// Fail every call with a provider error (status 503).
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Message list of the most recent call.
    pub fn last_messages(&self) -> Vec<Turn> {
        self.last.lock().unwrap().clone()
    }

    fn respond(&self, messages: &[Turn]) -> Result<String, GatewayError> {
        *self.last.lock().unwrap() = messages.to_vec();

        if self.fail {
            return Err(GatewayError::provider_status(503, "mock provider unavailable"));
        }

        Ok(match &self.reply {
            Some(reply) => reply.clone(),
            None => {
                let last_user = messages
                    .iter()
                    .rev()
                    .find(|t| t.role() == crate::domain::Role::User)
                    .map(|t| t.content())
                    .unwrap_or_default();
                format!("You said: {last_user}")
            }
        })
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, messages: &[Turn]) -> Result<ChatResult, GatewayError> {
        let content = self.respond(messages)?;
        let completion_tokens = content.split_whitespace().count() as u32;
        let prompt_tokens = messages.len() as u32;

        Ok(ChatResult::new(content, MOCK_MODEL).with_usage(TokenUsage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }))
    }

    async fn stream(&self, messages: &[Turn]) -> Result<FragmentStream, GatewayError> {
        let content = self.respond(messages)?;

        // split_inclusive keeps separators so the fragments concatenate back
        // to the full text.
        let fragments: Vec<Result<String, GatewayError>> = content
            .split_inclusive(' ')
            .map(|part| Ok(part.to_string()))
            .collect();

        Ok(Box::pin(stream::iter(fragments)))
    }
}

/// Deterministic offline [`ImageClient`].
pub struct MockImageClient;

impl MockImageClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageClient for MockImageClient {
    async fn generate(&self, prompt: &str) -> Result<ImageReference, GatewayError> {
        let slug: String = prompt
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .take(32)
            .collect();
        Ok(ImageReference::new(format!("https://images.invalid/{slug}.png")))
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    #[tokio::test]
    async fn echoes_last_user_turn() {
        let client = MockChatClient::new();
        let result = client
            .complete(&[Turn::user("hello"), Turn::assistant("hi"), Turn::user("again")])
            .await
            .unwrap();

        assert_eq!(result.content(), "You said: again");
        assert_eq!(result.model(), MOCK_MODEL);
        assert!(result.usage().is_some());
    }

    #[tokio::test]
    async fn stream_fragments_reassemble_to_completion() {
        let client = MockChatClient::with_reply("one two three");
        let completion = client.complete(&[Turn::user("x")]).await.unwrap();

        let mut stream = client.stream(&[Turn::user("x")]).await.unwrap();
        let mut text = String::new();
        while let Some(fragment) = stream.next().await {
            text.push_str(&fragment.unwrap());
        }

        assert_eq!(text, completion.content());
    }

    #[tokio::test]
    async fn failing_client_reports_provider_error() {
        let client = MockChatClient::failing();
        let err = client.complete(&[Turn::user("x")]).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }
}
