use serde::{Deserialize, Serialize};

/// Mermaid source text cleaned of markdown fencing.
///
/// Models frequently wrap diagram output in ```` ```mermaid ```` fences even
/// when told not to. [`DiagramSource::from_model_output`] strips the fence
/// delimiters wherever they occur and trims surrounding whitespace. The
/// transform is idempotent: cleaning already-clean source is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramSource(String);

impl DiagramSource {
    /// Clean raw model output into diagram source.
    pub fn from_model_output(raw: &str) -> Self {
        let cleaned = raw.trim().replace("```mermaid", "").replace("```", "");
        Self(cleaned.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
