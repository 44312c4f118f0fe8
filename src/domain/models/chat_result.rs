use serde::{Deserialize, Serialize};

/// Token accounting reported by the provider, when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Outcome of one synchronous chat completion.
///
/// `model` is the identifier the provider actually served the request with,
/// which may differ from the one requested (provider-side fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    content: String,
    model: String,
    usage: Option<TokenUsage>,
}

impl ChatResult {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn usage(&self) -> Option<&TokenUsage> {
        self.usage.as_ref()
    }

    /// Total token count for logging, `None` when the provider omitted usage.
    pub fn total_tokens(&self) -> Option<u32> {
        self.usage.map(|u| u.total_tokens)
    }

    pub fn into_content(self) -> String {
        self.content
    }
}
