use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::TranscriptStore;
use crate::connector::storage::DEFAULT_HISTORY_LIMIT;
use crate::domain::{GatewayError, Turn};

/// Transcript store backed by a JSON array of turns on disk.
///
/// A missing file reads as an empty history, so pointing the gateway at a
/// fresh path just starts a new conversation. The file retains every turn;
/// the recent-window bound applies on read only.
pub struct JsonFileTranscriptStore {
    path: PathBuf,
    limit: usize,
}

impl JsonFileTranscriptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Turn>, GatewayError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    async fn write_all(&self, turns: &[Turn]) -> Result<(), GatewayError> {
        let bytes = serde_json::to_vec_pretty(turns)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl TranscriptStore for JsonFileTranscriptStore {
    async fn history(&self) -> Result<Vec<Turn>, GatewayError> {
        let turns = self.read_all().await?;
        let skip = turns.len().saturating_sub(self.limit);
        Ok(turns[skip..].to_vec())
    }

    async fn append(&self, turn: Turn) -> Result<(), GatewayError> {
        let mut turns = self.read_all().await?;
        turns.push(turn);
        self.write_all(&turns).await
    }
}
