//! Ollama HTTP client
//!
//! One client serves both the completion and the embedding ports. Every
//! request carries the configured timeout and is retried with exponential
//! backoff while the failure is retryable.

use super::error::{OllamaError, Result};
use super::protocol::{EmbedRequest, EmbedResponse, GenerateRequest, GenerateResponse};
use crate::config::FileOllamaConfig;
use async_trait::async_trait;
use docqa_application::{CompletionService, EmbeddingService, ServiceError};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Run `call` until it succeeds, fails permanently, or retries run out.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, operation: &str, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.delay_for(attempt);
                warn!(
                    "{} failed (attempt {}/{}): {}; retrying in {:?}",
                    operation,
                    attempt + 1,
                    policy.max_retries + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Client for a local Ollama server
#[derive(Clone)]
pub struct OllamaClient {
    http: Client,
    base_url: String,
    llm_model: String,
    embed_model: String,
    retry: RetryPolicy,
}

impl OllamaClient {
    pub fn new(
        base_url: &str,
        llm_model: impl Into<String>,
        embed_model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OllamaError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            llm_model: llm_model.into(),
            embed_model: embed_model.into(),
            retry: RetryPolicy::none(),
        })
    }

    /// Build a client from the `[ollama]` config section
    pub fn from_config(config: &FileOllamaConfig) -> Result<Self> {
        Ok(Self::new(
            &config.base_url,
            config.llm_model.clone(),
            config.embed_model.clone(),
            config.timeout(),
        )?
        .with_retry_policy(RetryPolicy::new(
            config.max_retries,
            config.retry_backoff(),
        )))
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn llm_model(&self) -> &str {
        &self.llm_model
    }

    pub fn embed_model(&self) -> &str {
        &self.embed_model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| OllamaError::from_reqwest(url, e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(OllamaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        res.json::<R>()
            .await
            .map_err(|e| OllamaError::Decode(e.to_string()))
    }

    /// `POST /api/generate` with streaming disabled
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint("/api/generate");
        let body = GenerateRequest {
            model: &self.llm_model,
            prompt,
            stream: false,
        };

        debug!(
            "Generating with {} ({} prompt chars)",
            self.llm_model,
            prompt.chars().count()
        );

        let response: GenerateResponse =
            with_retry(self.retry, "generate", || self.post_json(&url, &body)).await?;
        if !response.done {
            warn!("Ollama reported an unfinished generation; using partial response");
        }
        Ok(response.response)
    }

    /// `POST /api/embed` for a batch of inputs
    pub async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint("/api/embed");
        let body = EmbedRequest {
            model: &self.embed_model,
            input: inputs,
        };

        debug!("Embedding {} inputs with {}", inputs.len(), self.embed_model);

        let response: EmbedResponse =
            with_retry(self.retry, "embed", || self.post_json(&url, &body)).await?;
        if response.embeddings.len() != inputs.len() {
            return Err(OllamaError::EmbeddingCount {
                expected: inputs.len(),
                got: response.embeddings.len(),
            });
        }
        Ok(response.embeddings)
    }
}

#[async_trait]
impl CompletionService for OllamaClient {
    async fn invoke(&self, prompt: &str) -> std::result::Result<String, ServiceError> {
        self.generate(prompt).await.map_err(ServiceError::from)
    }
}

#[async_trait]
impl EmbeddingService for OllamaClient {
    async fn embed(&self, texts: &[String]) -> std::result::Result<Vec<Vec<f32>>, ServiceError> {
        self.embed_batch(texts).await.map_err(ServiceError::from)
    }
}
