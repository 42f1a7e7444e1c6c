pub mod openai;

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;

use crate::cli::Args;
use crate::error::RadarError;
use crate::models::chat::ChatMessage;
use self::openai::OpenAiChatClient;

/// Incremental text fragments from one streaming completion, in arrival
/// order. The stream ends after the upstream closes or errors.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String, RadarError>> + Send>>;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            api_key: Some(args.chat_api_key.clone()).filter(|k| !k.is_empty()),
            model: args.chat_model.clone(),
            base_url: args.chat_base_url.clone(),
            temperature: 0.7,
        }
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// One non-streaming completion; returns the full assistant text.
    async fn complete(
        &self,
        system: &str,
        history: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, RadarError>;

    /// One streaming completion; fragments are produced as they arrive.
    async fn complete_stream(
        &self,
        system: &str,
        history: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<TokenStream, RadarError>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, RadarError> {
    let client = OpenAiChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
