use std::sync::Arc;

use crate::application::ImageClient;
use crate::domain::{GatewayError, ImageReference};

/// Image generation: one independent call per prompt, no context.
pub struct ImageUseCase {
    client: Arc<dyn ImageClient>,
}

impl ImageUseCase {
    pub fn new(client: Arc<dyn ImageClient>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, prompt: &str) -> Result<ImageReference, GatewayError> {
        self.client.generate(prompt).await
    }
}
