//! Model client for AI inference using an OpenAI-compatible API

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::conversation::{Conversation, Role, Turn};
use crate::error::{ChatError, Result};

/// Reply text used when the endpoint answers with an unexpected shape
pub const PARSE_FALLBACK: &str = "I could not parse the model output.";

/// Prefix of the reply text produced when the remote call fails
pub const MODEL_ERROR_PREFIX: &str = "Model Error: ";

/// Configuration for the hosted model endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_token: String,
    pub model_id: String,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.huggingface.co/v1".to_string(),
            api_token: String::new(),
            model_id: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            max_tokens: 300,
        }
    }
}

impl ModelConfig {
    /// Create a new ModelConfig with custom settings
    pub fn new(base_url: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model_id: model_id.into(),
            ..Default::default()
        }
    }

    /// Set the API token
    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = api_token.into();
        self
    }

    /// Set the completion length bound
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// An interface for sending a conversation to a chat-completion endpoint.
///
/// `Ok(None)` means the endpoint answered but the response lacked the
/// expected shape (no choice, or no textual message content).
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn complete(&self, turns: &[Turn]) -> Result<Option<String>>;
}

/// Production backend over an OpenAI-compatible endpoint
pub struct OpenAiBackend {
    model_id: String,
    max_tokens: u32,
    client: Client<OpenAIConfig>,
}

impl OpenAiBackend {
    pub fn new(config: &ModelConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(&config.base_url)
            .with_api_key(&config.api_token);

        Self {
            model_id: config.model_id.clone(),
            max_tokens: config.max_tokens,
            client: Client::with_config(openai_config),
        }
    }

    fn build_messages(turns: &[Turn]) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::with_capacity(turns.len());
        for turn in turns {
            let message = match turn.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.content.as_str())
                    .build()?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.content.as_str())
                    .build()?
                    .into(),
            };
            messages.push(message);
        }
        Ok(messages)
    }
}

#[async_trait]
impl InferenceBackend for OpenAiBackend {
    async fn complete(&self, turns: &[Turn]) -> Result<Option<String>> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_id)
            .max_tokens(self.max_tokens)
            .messages(Self::build_messages(turns)?)
            .build()?;

        debug!(model = %self.model_id, turns = turns.len(), "sending completion request");
        let response = self.client.chat().create(request).await?;

        // The expected shape is choices[0].message.content
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

/// Client for a hosted chat-completion model.
///
/// `ask` never fails: remote errors and unexpected response shapes are
/// degraded to reply text so the conversation stays usable.
pub struct ChatClient {
    config: ModelConfig,
    backend: Box<dyn InferenceBackend>,
}

impl ChatClient {
    /// Create a new ChatClient backed by the OpenAI-compatible endpoint
    pub fn new(config: ModelConfig) -> Self {
        let backend = Box::new(OpenAiBackend::new(&config));
        Self { config, backend }
    }

    /// Create a ChatClient with a custom backend
    pub fn with_backend(config: ModelConfig, backend: Box<dyn InferenceBackend>) -> Self {
        Self { config, backend }
    }

    /// Send the full conversation and return one reply.
    ///
    /// Any failure is converted into reply text: an unexpected response
    /// shape yields [`PARSE_FALLBACK`], a remote error yields its display
    /// prefixed with [`MODEL_ERROR_PREFIX`].
    pub async fn ask(&self, conversation: &Conversation) -> String {
        match self.backend.complete(conversation.turns()).await {
            Ok(Some(content)) => content,
            Ok(None) => {
                warn!("completion response had no parseable message content");
                PARSE_FALLBACK.to_string()
            }
            Err(e) => {
                warn!(error = %e, "completion request failed");
                format!("{}{}", MODEL_ERROR_PREFIX, e)
            }
        }
    }

    /// Test connection to the endpoint by sending a tiny request
    pub async fn test_connection(&self) -> Result<()> {
        let mut probe = Conversation::new();
        probe.push(Turn::user("Hi"));

        match self.backend.complete(probe.turns()).await? {
            Some(_) => Ok(()),
            None => Err(ChatError::EmptyCompletion),
        }
    }

    /// Get the model config
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}
