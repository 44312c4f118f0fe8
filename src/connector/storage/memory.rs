use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::TranscriptStore;
use crate::connector::storage::DEFAULT_HISTORY_LIMIT;
use crate::domain::{GatewayError, Turn};

/// In-memory transcript store. Default wiring when no transcript file is
/// configured, and the test double for the persistent variant.
pub struct InMemoryTranscriptStore {
    turns: Mutex<Vec<Turn>>,
    limit: usize,
}

impl InMemoryTranscriptStore {
    pub fn new() -> Self {
        Self {
            turns: Mutex::new(Vec::new()),
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }
}

impl Default for InMemoryTranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscriptStore {
    async fn history(&self) -> Result<Vec<Turn>, GatewayError> {
        let turns = self.turns.lock().unwrap();
        let skip = turns.len().saturating_sub(self.limit);
        Ok(turns[skip..].to_vec())
    }

    async fn append(&self, turn: Turn) -> Result<(), GatewayError> {
        self.turns.lock().unwrap().push(turn);
        Ok(())
    }
}
