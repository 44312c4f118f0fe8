use async_trait::async_trait;

use crate::domain::{GatewayError, Turn};

/// Conversation history supplied to, and fed by, the chat use cases.
///
/// The store owns its trimming policy; callers only rely on `history`
/// returning a bounded, ordered sequence of prior turns, oldest first.
/// Serializing session-mutating effects across concurrent calls is the
/// caller's responsibility, not the store's.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Prior turns, oldest first, bounded by the store's recent window.
    async fn history(&self) -> Result<Vec<Turn>, GatewayError>;

    /// Record a completed turn.
    async fn append(&self, turn: Turn) -> Result<(), GatewayError>;
}
