use futures::StreamExt;
use log::{ debug, warn };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use async_trait::async_trait;

use super::{ ChatClient, LlmConfig, TokenStream };
use crate::error::RadarError;
use crate::models::chat::ChatMessage;

/// Client for the OpenAI chat-completions API, covering both the single-shot
/// scanner call and the token-streamed chat turn.
pub struct OpenAiChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: WireMessage,
}

#[derive(Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: Delta,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Delta {
    content: Option<String>,
}

impl OpenAiChatClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        temperature: f32,
    ) -> Result<Self, RadarError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| RadarError::Config(format!("invalid API key format: {}", e)))?
        );

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RadarError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, model, base_url, temperature })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, RadarError> {
        let api_key = config.api_key
            .clone()
            .ok_or_else(|| RadarError::Config("Missing API key".to_string()))?;

        Self::new(api_key, config.model.clone(), config.base_url.clone(), config.temperature)
    }

    fn wire_messages(system: &str, history: &[ChatMessage]) -> Vec<WireMessage> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(WireMessage { role: "system".to_string(), content: system.to_string() });
        messages.extend(history.iter().map(|m| WireMessage {
            role: m.role.clone(),
            content: m.content.clone(),
        }));
        messages
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(
        &self,
        system: &str,
        history: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, RadarError> {
        let req = ChatRequest {
            model: self.model.clone(),
            messages: Self::wire_messages(system, history),
            temperature: self.temperature,
            max_tokens,
            stream: None,
        };

        let resp = self.http.post(&self.base_url)
            .json(&req)
            .send()
            .await
            .map_err(|e| RadarError::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| RadarError::Upstream(e.to_string()))?
            .json::<ChatResponse>()
            .await
            .map_err(|e| RadarError::Upstream(format!("malformed completion response: {}", e)))?;

        let content = resp.choices.first()
            .ok_or_else(|| RadarError::Upstream("no choices in completion response".to_string()))?
            .message.content.clone();

        Ok(content)
    }

    async fn complete_stream(
        &self,
        system: &str,
        history: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<TokenStream, RadarError> {
        let req = ChatRequest {
            model: self.model.clone(),
            messages: Self::wire_messages(system, history),
            temperature: self.temperature,
            max_tokens,
            stream: Some(true),
        };

        let url = self.base_url.clone();
        let client = self.http.clone();
        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let resp = match client.post(&url).json(&req).send().await {
                Ok(r) => r,
                Err(e) => {
                    let _ = tx.send(Err(RadarError::Upstream(e.to_string()))).await;
                    return;
                }
            };

            if let Err(e) = resp.error_for_status_ref() {
                let _ = tx.send(Err(RadarError::Upstream(e.to_string()))).await;
                return;
            }

            let mut bytes = resp.bytes_stream();
            // Chunk boundaries line up with neither SSE lines nor UTF-8
            // character boundaries; carry raw bytes and only decode complete
            // lines.
            let mut carry: Vec<u8> = Vec::new();

            while let Some(chunk_result) = bytes.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        let _ = tx.send(Err(RadarError::Upstream(e.to_string()))).await;
                        return;
                    }
                };

                carry.extend_from_slice(&chunk);

                while let Some(pos) = carry.iter().position(|&b| b == b'\n') {
                    let line_bytes: Vec<u8> = carry.drain(..=pos).collect();
                    let line = String::from_utf8_lossy(&line_bytes);
                    let line = line.trim_end();

                    if line.is_empty() || line == "data: [DONE]" {
                        continue;
                    }

                    let data = match line.strip_prefix("data: ") {
                        Some(d) => d,
                        None => continue,
                    };

                    match serde_json::from_str::<StreamResponse>(data) {
                        Ok(stream_resp) => {
                            for choice in stream_resp.choices {
                                if let Some(content) = choice.delta.content {
                                    if !content.is_empty() {
                                        if tx.send(Ok(content)).await.is_err() {
                                            // Consumer went away; stop reading.
                                            return;
                                        }
                                    }
                                }

                                if choice.finish_reason.as_deref() == Some("stop") {
                                    return;
                                }
                            }
                        }
                        Err(e) => {
                            debug!("skipping unparseable stream line: {} ({})", data, e);
                        }
                    }
                }
            }

            if !carry.is_empty() {
                warn!("upstream stream ended mid-line: {:?}", String::from_utf8_lossy(&carry));
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}
