use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::{
    ChatClient, ChatUseCase, DiagramUseCase, ImageClient, ImageUseCase, StreamChatUseCase,
    TranscriptStore,
};
use crate::connector::storage::DEFAULT_HISTORY_LIMIT;
use crate::{
    InMemoryTranscriptStore, JsonFileTranscriptStore, MockChatClient, MockImageClient,
    OpenRouterClient,
};

pub struct ContainerConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub image_model: String,
    /// Use the deterministic offline clients instead of the live provider.
    pub mock: bool,
    /// Conversation transcript file; `None` keeps history in memory for the
    /// duration of the process.
    pub transcript: Option<PathBuf>,
    pub history_limit: usize,
}

impl ContainerConfig {
    /// Read provider settings from `OPENROUTER_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENROUTER_API_KEY").unwrap_or_default(),
            base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| crate::connector::adapter::DEFAULT_BASE_URL.to_string()),
            chat_model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| crate::connector::adapter::DEFAULT_CHAT_MODEL.to_string()),
            image_model: std::env::var("OPENROUTER_IMAGE_MODEL")
                .unwrap_or_else(|_| crate::connector::adapter::DEFAULT_IMAGE_MODEL.to_string()),
            mock: false,
            transcript: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    image_client: Arc<dyn ImageClient>,
    transcript_store: Arc<dyn TranscriptStore>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let (chat_client, image_client): (Arc<dyn ChatClient>, Arc<dyn ImageClient>) =
            if config.mock {
                debug!("Using mock provider clients");
                (Arc::new(MockChatClient::new()), Arc::new(MockImageClient::new()))
            } else {
                let client = Arc::new(OpenRouterClient::new(
                    config.api_key.clone(),
                    config.chat_model.clone(),
                    config.image_model.clone(),
                    config.base_url.clone(),
                ));
                (client.clone(), client)
            };

        let transcript_store: Arc<dyn TranscriptStore> = match &config.transcript {
            Some(path) => {
                debug!("Using transcript file at {}", path.display());
                Arc::new(JsonFileTranscriptStore::new(path).with_limit(config.history_limit))
            }
            None => Arc::new(InMemoryTranscriptStore::new().with_limit(config.history_limit)),
        };

        Self {
            chat_client,
            image_client,
            transcript_store,
        }
    }

    pub fn chat_use_case(&self) -> ChatUseCase {
        ChatUseCase::new(self.chat_client.clone(), self.transcript_store.clone())
    }

    pub fn stream_chat_use_case(&self) -> StreamChatUseCase {
        StreamChatUseCase::new(self.chat_client.clone(), self.transcript_store.clone())
    }

    pub fn diagram_use_case(&self) -> DiagramUseCase {
        DiagramUseCase::new(self.chat_client.clone())
    }

    pub fn image_use_case(&self) -> ImageUseCase {
        ImageUseCase::new(self.image_client.clone())
    }
}
