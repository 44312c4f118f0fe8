pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    compose_messages, ChatClient, ChatUseCase, DiagramUseCase, FragmentStream, ImageClient,
    ImageUseCase, StreamChatUseCase, TranscriptStore,
};

pub use cli::Commands;

pub use connector::{
    Container, ContainerConfig, InMemoryTranscriptStore, JsonFileTranscriptStore, MockChatClient,
    MockImageClient, OpenRouterClient, Router, SseFragmentStream,
};

pub use domain::{
    ChatResult, DiagramSource, GatewayError, ImageReference, Role, TokenUsage, Turn,
};
