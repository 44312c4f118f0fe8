use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::domain::{ChatResult, GatewayError, Turn};

/// Lazy, finite, forward-only sequence of assistant text fragments.
///
/// Fragments arrive strictly in the order the provider emitted them. The
/// stream ends normally on the provider's terminal marker or when the
/// connection closes; a mid-stream transport failure yields one `Err` item
/// and then the stream ends. Dropping the stream before exhaustion aborts
/// the underlying connection — no background work continues.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, GatewayError>> + Send>>;

/// An interface for exchanging a composed message list with a chat-completion
/// provider.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Consumers (the chat, streaming, and diagram use cases) remain
/// decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `messages` and wait for the complete assistant response.
    ///
    /// The message list is forwarded verbatim; no turn is reordered,
    /// deduplicated, or mutated.
    async fn complete(&self, messages: &[Turn]) -> Result<ChatResult, GatewayError>;

    /// Send `messages` with streaming enabled and return the fragment stream.
    ///
    /// Fails before yielding any fragment on a non-2xx initial response or a
    /// connection-level error.
    async fn stream(&self, messages: &[Turn]) -> Result<FragmentStream, GatewayError>;
}
