use std::sync::Arc;

use tracing::info;

use crate::application::use_cases::compose::compose_messages;
use crate::application::ChatClient;
use crate::domain::{DiagramSource, GatewayError};

/// Instruction wrapper for diagram requests. The model is told to answer with
/// bare mermaid source; the cleanup transform handles the cases where it
/// wraps the output in fences anyway.
fn diagram_prompt(prompt: &str) -> String {
    format!(
        "Generate a mermaid diagram for: {prompt}\n\n\
         Return ONLY the mermaid code without any markdown code blocks or \
         explanations. Start directly with 'graph' or 'sequenceDiagram' etc."
    )
}

/// Diagram generation: a derived chat call with a fixed instruction template,
/// empty context, and fence-stripping post-processing.
pub struct DiagramUseCase {
    client: Arc<dyn ChatClient>,
}

impl DiagramUseCase {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Produce cleaned diagram source for a natural-language prompt.
    ///
    /// No conversation history is carried over. Provider errors propagate
    /// unchanged.
    pub async fn execute(&self, prompt: &str) -> Result<DiagramSource, GatewayError> {
        let messages = compose_messages(&[], &diagram_prompt(prompt));
        let result = self.client.complete(&messages).await?;

        let source = DiagramSource::from_model_output(result.content());

        info!(
            operation = "diagram",
            model = result.model(),
            length = source.len(),
            "Diagram generated"
        );

        Ok(source)
    }
}
