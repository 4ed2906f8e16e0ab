use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{GenerateRequest, GenerationBackend};
use crate::error::ChatError;

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

#[derive(Deserialize)]
struct OllamaModelsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client whose requests fail with a transport error after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn query(&self, request: &GenerateRequest) -> Result<String, ChatError> {
        let url = format!("{}/api/generate", self.base_url);
        debug!(%url, model = %request.model, "sending generate request");

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status));
        }

        // Decode separately so a bad body is reported as malformed, not transport
        let body = response.text().await?;
        let ollama_response: OllamaResponse = serde_json::from_str(&body)?;
        Ok(ollama_response.response)
    }

    pub async fn list_models(&self) -> Result<Vec<String>, ChatError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status));
        }

        let body = response.text().await?;
        let models_response: OllamaModelsResponse = serde_json::from_str(&body)?;
        let model_names: Vec<String> = models_response
            .models
            .into_iter()
            .map(|model| model.name)
            .collect();

        Ok(model_names)
    }

    /// Installed model names carry a tag (`llama3:latest`); a bare name matches its `latest` tag.
    pub async fn has_model(&self, name: &str) -> Result<bool, ChatError> {
        let models = self.list_models().await?;
        Ok(models.iter().any(|m| model_matches(m, name)))
    }
}

fn model_matches(installed: &str, wanted: &str) -> bool {
    installed == wanted
        || (!wanted.contains(':') && installed.strip_suffix(":latest") == Some(wanted))
}

#[async_trait]
impl GenerationBackend for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ChatError> {
        self.query(request).await
    }
}
