use std::sync::Arc;

use crate::application::use_cases::compose::compose_messages;
use crate::application::{ChatClient, TranscriptStore};
use crate::domain::{ChatResult, GatewayError, Turn};

/// Synchronous chat: bounded history + new input → one completed response.
///
/// The user turn is recorded before the provider call, the assistant turn
/// after a successful one. A failed call therefore leaves the user turn in
/// the transcript, matching the session semantics of the desktop frontend
/// this gateway was extracted from.
pub struct ChatUseCase {
    client: Arc<dyn ChatClient>,
    store: Arc<dyn TranscriptStore>,
}

impl ChatUseCase {
    pub fn new(client: Arc<dyn ChatClient>, store: Arc<dyn TranscriptStore>) -> Self {
        Self { client, store }
    }

    pub async fn execute(&self, input: &str) -> Result<ChatResult, GatewayError> {
        let history = self.store.history().await?;
        let messages = compose_messages(&history, input);

        self.store.append(Turn::user(input)).await?;

        let result = self.client.complete(&messages).await?;

        self.store.append(Turn::assistant(result.content())).await?;

        Ok(result)
    }
}
