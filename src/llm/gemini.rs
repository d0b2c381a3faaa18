//! Google Gemini `generateContent` client

use crate::config::Config;
use crate::error::{CritiqueError, Result};
use crate::llm::provider::FeedbackProvider;
use async_trait::async_trait;
use log::{debug, warn};
use serde_json::{json, Value};
use std::time::Duration;

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    api_key_env: String,
}

impl GeminiProvider {
    pub fn new(api_key: Option<String>, model: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CritiqueError::ProviderUnavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
        })
    }

    /// Build from configuration. A missing credential is not an error here.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut provider = Self::new(
            config.api_key(),
            config.provider.gemini_model.clone(),
            config.provider.api_base_url.clone(),
            Duration::from_secs(config.provider.timeout_secs),
        )?;
        provider.api_key_env = config.provider.api_key_env.clone();
        Ok(provider)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Request body for a single-turn prompt
    fn build_request_body(prompt: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        })
    }

    /// Concatenated text parts of the first candidate
    fn extract_text(response: &Value) -> Result<String> {
        if let Some(reason) = response["promptFeedback"]["blockReason"].as_str() {
            return Err(CritiqueError::ProviderError(format!("prompt blocked: {}", reason)));
        }

        let parts = response["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| {
                CritiqueError::ProviderError("malformed response: missing candidates[0].content.parts".to_string())
            })?;

        let text: String = parts.iter().filter_map(|part| part["text"].as_str()).collect();

        if text.is_empty() {
            return Err(CritiqueError::ProviderError("malformed response: no text in candidate".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl FeedbackProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Google Gemini (AI)"
    }

    fn ensure_available(&self) -> Result<()> {
        match self.api_key {
            Some(_) => Ok(()),
            None => Err(CritiqueError::ProviderUnavailable(format!(
                "Google Gemini not available. Set {} to use it, or use demo mode",
                self.api_key_env
            ))),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.ensure_available()?;
        let api_key = self.api_key.as_deref().unwrap_or_default();

        debug!("Gemini request to model={}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&Self::build_request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned status {}", status.as_u16());
            return Err(CritiqueError::ProviderError(format!(
                "API error: {} {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CritiqueError::ProviderError(format!("malformed response: {}", e)))?;

        Self::extract_text(&body)
    }
}
