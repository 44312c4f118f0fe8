use std::sync::Arc;

use tracing::debug;

use crate::application::use_cases::compose::compose_messages;
use crate::application::{ChatClient, FragmentStream, TranscriptStore};
use crate::domain::{GatewayError, Turn};

/// Streamed chat: bounded history + new input → live fragment sequence.
///
/// Only the user turn is recorded; the caller consumes the fragments and
/// decides what, if anything, to persist. Stopping iteration early aborts
/// the provider connection.
pub struct StreamChatUseCase {
    client: Arc<dyn ChatClient>,
    store: Arc<dyn TranscriptStore>,
}

impl StreamChatUseCase {
    pub fn new(client: Arc<dyn ChatClient>, store: Arc<dyn TranscriptStore>) -> Self {
        Self { client, store }
    }

    pub async fn execute(&self, input: &str) -> Result<FragmentStream, GatewayError> {
        let history = self.store.history().await?;
        let messages = compose_messages(&history, input);

        self.store.append(Turn::user(input)).await?;

        debug!(
            operation = "stream_chat",
            context_turns = history.len(),
            "Opening fragment stream"
        );

        self.client.stream(&messages).await
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;
    use crate::connector::{InMemoryTranscriptStore, MockChatClient};

    #[tokio::test]
    async fn yields_fragments_and_records_user_turn() {
        let client = Arc::new(MockChatClient::new());
        let store = Arc::new(InMemoryTranscriptStore::new());
        let use_case = StreamChatUseCase::new(client, store.clone());

        let mut stream = use_case.execute("hello").await.unwrap();

        let mut text = String::new();
        while let Some(fragment) = stream.next().await {
            text.push_str(&fragment.unwrap());
        }
        assert!(!text.is_empty());

        let turns = store.history().await.unwrap();
        assert_eq!(turns, vec![Turn::user("hello")]);
    }

    #[tokio::test]
    async fn failed_open_propagates_before_any_fragment() {
        let client = Arc::new(MockChatClient::failing());
        let store = Arc::new(InMemoryTranscriptStore::new());
        let use_case = StreamChatUseCase::new(client, store);

        let err = use_case.execute("hello").await.err().unwrap();
        assert!(err.is_provider_request());
    }
}
