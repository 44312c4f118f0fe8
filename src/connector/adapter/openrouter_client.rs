use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::application::{ChatClient, FragmentStream, ImageClient};
use crate::connector::adapter::sse::SseFragmentStream;
use crate::domain::{ChatResult, GatewayError, ImageReference, TokenUsage, Turn};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const IMAGE_GENERATIONS_PATH: &str = "/images/generations";
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_IMAGE_MODEL: &str = "openai/dall-e-3";
const IMAGE_COUNT: u32 = 1;
const IMAGE_SIZE: &str = "1024x1024";

/// Chat-completions request payload.
#[derive(serde::Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: String,
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(serde::Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

/// HTTP client for OpenRouter (and any OpenAI-compatible endpoint).
///
/// Implements [`ChatClient`] and [`ImageClient`] so the use cases stay
/// decoupled from transport and serialization details. Holds only
/// constructor-injected configuration — no global state — and performs no
/// retries: every error propagates to the caller with the HTTP status
/// preserved when one was received.
///
/// Override the endpoint via `OPENROUTER_BASE_URL` to target any compatible
/// server, e.g. a locally running inference proxy.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    chat_model: String,
    image_model: String,
    chat_url: String,
    image_url: String,
}

impl OpenRouterClient {
    /// Create a client with explicit credentials, models, and endpoint.
    ///
    /// An empty API key is tolerated here — construction always succeeds and
    /// the provider's authorization failure surfaces on the first call.
    pub fn new(
        api_key: impl Into<String>,
        chat_model: impl Into<String>,
        image_model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let api_key = api_key.into();
        if api_key.is_empty() {
            warn!("OpenRouter API key not configured; provider calls will be rejected");
        }

        let base: String = base_url.into();
        let trimmed = base.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            api_key,
            chat_model: chat_model.into(),
            image_model: image_model.into(),
            chat_url: format!("{trimmed}{CHAT_COMPLETIONS_PATH}"),
            image_url: format!("{trimmed}{IMAGE_GENERATIONS_PATH}"),
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable                 | Default                        |
    /// |--------------------------|--------------------------------|
    /// | `OPENROUTER_API_KEY`     | `""` (warned, calls fail)      |
    /// | `OPENROUTER_BASE_URL`    | `https://openrouter.ai/api/v1` |
    /// | `OPENROUTER_MODEL`       | `openai/gpt-4o-mini`           |
    /// | `OPENROUTER_IMAGE_MODEL` | `openai/dall-e-3`              |
    pub fn from_env() -> Self {
        let key = std::env::var("OPENROUTER_API_KEY").unwrap_or_default();
        let base = std::env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let chat_model = std::env::var("OPENROUTER_MODEL")
            .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let image_model = std::env::var("OPENROUTER_IMAGE_MODEL")
            .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());
        Self::new(key, chat_model, image_model, base)
    }

    fn ensure_model(model: &str, what: &str) -> Result<(), GatewayError> {
        if model.trim().is_empty() {
            return Err(GatewayError::configuration(format!(
                "{what} identifier is not configured"
            )));
        }
        Ok(())
    }

    async fn post_chat(
        &self,
        messages: &[Turn],
        stream: Option<bool>,
    ) -> Result<reqwest::Response, GatewayError> {
        Self::ensure_model(&self.chat_model, "chat model")?;

        let request = ChatRequest {
            model: &self.chat_model,
            messages,
            stream,
        };

        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(operation = "chat", "Chat request failed: {e}");
                GatewayError::provider_transport(format!("chat request failed: {e}"))
            })?;

        fail_on_status(response, "chat").await
    }
}

/// Map a non-2xx response to [`GatewayError::ProviderRequest`], keeping the
/// status code and the provider's body text as the message.
async fn fail_on_status(
    response: reqwest::Response,
    operation: &str,
) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        body
    };
    error!(operation, status = status.as_u16(), "Provider returned {status}: {message}");

    Err(GatewayError::provider_status(status.as_u16(), message))
}

#[async_trait]
impl ChatClient for OpenRouterClient {
    async fn complete(&self, messages: &[Turn]) -> Result<ChatResult, GatewayError> {
        let response = self.post_chat(messages, None).await?;

        let api_response: ChatResponse = response.json().await.map_err(|e| {
            error!(operation = "chat", "Failed to decode chat response: {e}");
            GatewayError::malformed(format!("failed to decode chat response: {e}"))
        })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::malformed("chat response has no choices"))?;

        let mut result = ChatResult::new(choice.message.content, api_response.model);
        if let Some(usage) = api_response.usage {
            result = result.with_usage(usage);
        }

        info!(
            operation = "chat",
            model = result.model(),
            tokens = result.total_tokens(),
            "Chat response received"
        );

        Ok(result)
    }

    async fn stream(&self, messages: &[Turn]) -> Result<FragmentStream, GatewayError> {
        let response = self.post_chat(messages, Some(true)).await?;

        let bytes = response
            .bytes_stream()
            .map_err(|e| GatewayError::provider_transport(format!("stream interrupted: {e}")))
            .boxed();

        Ok(SseFragmentStream::new(bytes).boxed())
    }
}

#[async_trait]
impl ImageClient for OpenRouterClient {
    async fn generate(&self, prompt: &str) -> Result<ImageReference, GatewayError> {
        Self::ensure_model(&self.image_model, "image model")?;

        let request = ImageRequest {
            model: &self.image_model,
            prompt,
            n: IMAGE_COUNT,
            size: IMAGE_SIZE,
        };

        let response = self
            .client
            .post(&self.image_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(operation = "image", "Image request failed: {e}");
                GatewayError::provider_transport(format!("image request failed: {e}"))
            })?;

        let response = fail_on_status(response, "image").await?;

        let api_response: ImageResponse = response.json().await.map_err(|e| {
            error!(operation = "image", "Failed to decode image response: {e}");
            GatewayError::malformed(format!("failed to decode image response: {e}"))
        })?;

        let url = api_response
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or_else(|| GatewayError::malformed("image response has no url"))?;

        info!(operation = "image", url = %url, "Image generated");

        Ok(ImageReference::new(url))
    }
}
