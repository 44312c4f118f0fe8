use async_trait::async_trait;

use crate::domain::{GatewayError, ImageReference};

/// An interface for the provider's image-generation endpoint.
///
/// Each call is independent; no conversational context is involved.
#[async_trait]
pub trait ImageClient: Send + Sync {
    /// Generate one image for `prompt` and return its locator.
    async fn generate(&self, prompt: &str) -> Result<ImageReference, GatewayError>;
}
