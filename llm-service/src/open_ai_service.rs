//! OpenAI service for text generation and embeddings.
//!
//! Minimal, non-streaming client around the OpenAI REST API. Endpoints are
//! derived from `OpenAiConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions — chat completion
//! - POST {endpoint}/v1/embeddings       — embeddings retrieval
//!
//! The chat decoder is deliberately forgiving: when the response carries no
//! `choices[0].message.content`, the raw JSON is stringified and returned
//! instead of failing the request.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::OpenAiConfig;
use crate::error_handler::{LlmError, make_snippet};

/// Thin client for the OpenAI API.
///
/// Constructed once per profile from an [`OpenAiConfig`]; internally keeps a
/// preconfigured `reqwest::Client` with bearer auth and a timeout.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: OpenAiConfig,
    url_chat: String,
    url_embeddings: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given profile config.
    ///
    /// # Errors
    /// - [`LlmError::Decode`] if the API key cannot form a valid header
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: OpenAiConfig) -> Result<Self, LlmError> {
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
                .map_err(|e| LlmError::Decode(format!("invalid API key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = cfg.endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);
        let url_embeddings = format!("{}/v1/embeddings", base);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
            url_embeddings,
        })
    }

    /// Model identifier this profile talks to.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// API base URL this profile talks to.
    pub fn endpoint(&self) -> &str {
        &self.cfg.endpoint
    }

    /// Bearer credential (used by the health probe).
    pub(crate) fn api_key(&self) -> &str {
        &self.cfg.api_key
    }

    /// Performs a non-streaming chat completion request.
    ///
    /// The prompt is sent as a single user message; `model`, `temperature`,
    /// and `max_tokens` come from the profile config.
    ///
    /// # Errors
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`LlmError::Decode`] if the body is not JSON at all
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest {
            model: &self.cfg.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.cfg.temperature,
            max_tokens: self.cfg.max_tokens,
        };

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "OpenAI /v1/chat/completions returned non-success status"
            );

            return Err(LlmError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let raw: Value = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("chat completion body is not JSON: {e}")))?;

        let content = extract_content(raw);

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            reply_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }

    /// Retrieves a single embeddings vector via `/v1/embeddings`.
    ///
    /// # Errors
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`LlmError::Decode`] / [`LlmError::EmptyEmbedding`] for bad payloads
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        let started = Instant::now();
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            input,
        };

        debug!(
            model = %self.cfg.model,
            input_len = input.len(),
            "POST {}", self.url_embeddings
        );

        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embeddings.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "OpenAI /v1/embeddings returned non-success status"
            );

            return Err(LlmError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let raw: Value = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("embeddings body is not JSON: {e}")))?;

        let vector = raw
            .get("data")
            .and_then(Value::as_array)
            .and_then(|data| data.first())
            .and_then(|item| item.get("embedding"))
            .and_then(Value::as_array)
            .map(|xs| {
                xs.iter()
                    .filter_map(Value::as_f64)
                    .map(|x| x as f32)
                    .collect::<Vec<f32>>()
            })
            .ok_or(LlmError::EmptyEmbedding)?;

        if vector.is_empty() {
            return Err(LlmError::EmptyEmbedding);
        }

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            dim = vector.len(),
            "embeddings completed"
        );

        Ok(vector)
    }
}

/// Extracts the assistant text from a chat completion payload.
///
/// Falls back to the stringified payload when no text field is present, so
/// an unexpected-but-successful response still yields a reply.
fn extract_content(raw: Value) -> String {
    match raw
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|cs| cs.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
    {
        Some(text) => text.to_string(),
        None => raw.to_string(),
    }
}

/// Minimal request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Chat message for the OpenAI API.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Request body for `/v1/embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}
