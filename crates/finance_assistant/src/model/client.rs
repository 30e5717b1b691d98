//! Model client for text completion using an OpenAI-compatible API

use async_openai::{
    config::OpenAIConfig,
    types::{
        CreateCompletionRequest, CreateCompletionRequestArgs, CreateCompletionResponse, Prompt,
        Stop,
    },
    Client,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{FinanceError, Result};

/// Configuration for the completion model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: String,
    pub model_name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: "YOUR_API_KEY".to_string(),
            model_name: "gpt-3.5-turbo-instruct".to_string(),
        }
    }
}

impl ModelConfig {
    /// Create a new ModelConfig with custom settings
    pub fn new(base_url: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model_name: model_name.into(),
            ..Default::default()
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }
}

/// Parameters of a single completion exchange, independent of the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
}

impl CompletionRequest {
    /// Create a request with no stop sequences
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            stop_sequences: Vec::new(),
        }
    }
}

/// Response from the completion model
#[derive(Debug, Clone)]
pub struct ModelResponse {
    /// Text of the first choice
    pub text: String,
    pub finish_reason: Option<String>,
    /// Total request time (seconds)
    pub total_time: Option<f64>,
}

/// A backend able to turn a prompt into generated text
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Perform one request/response exchange with the completion endpoint
    async fn complete(&self, request: CompletionRequest) -> Result<ModelResponse>;
}

/// Client for interacting with OpenAI-compatible completion endpoints
pub struct ModelClient {
    config: ModelConfig,
    client: Client<OpenAIConfig>,
}

impl ModelClient {
    /// Create a new ModelClient
    pub fn new(config: ModelConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(&config.base_url)
            .with_api_key(&config.api_key);

        let client = Client::with_config(openai_config);

        Self { config, client }
    }

    /// Get the model configuration
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Test connection to the model API by sending a simple request
    pub async fn test_connection(&self) -> Result<()> {
        let request = self.build_request(&CompletionRequest::new("Hi", 5))?;
        let response = self.client.completions().create(request).await?;

        if response.choices.is_empty() {
            return Err(FinanceError::EmptyResponse(
                "Received empty response from API".to_string(),
            ));
        }

        Ok(())
    }

    /// Map a backend-neutral request onto the completions API payload
    pub fn build_request(&self, request: &CompletionRequest) -> Result<CreateCompletionRequest> {
        let request = CreateCompletionRequestArgs::default()
            .model(&self.config.model_name)
            .prompt(Prompt::String(request.prompt.clone()))
            .max_tokens(request.max_tokens)
            .stop(Stop::StringArray(request.stop_sequences.clone()))
            .build()?;

        Ok(request)
    }

    /// Extract the first choice of a completions response
    fn parse_response(response: CreateCompletionResponse) -> Result<ModelResponse> {
        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Completion usage"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| FinanceError::EmptyResponse(format!("no choices in {}", response.id)))?;

        Ok(ModelResponse {
            text: choice.text,
            finish_reason: choice
                .finish_reason
                .map(|reason| format!("{:?}", reason).to_lowercase()),
            total_time: None,
        })
    }
}

#[async_trait]
impl CompletionApi for ModelClient {
    async fn complete(&self, request: CompletionRequest) -> Result<ModelResponse> {
        let start_time = Instant::now();
        let payload = self.build_request(&request)?;
        debug!("Completion request: {}", serde_json::to_string(&payload)?);

        let response = self.client.completions().create(payload).await?;

        let mut parsed = Self::parse_response(response)?;
        let total_time = start_time.elapsed().as_secs_f64();
        parsed.total_time = Some(total_time);

        info!(
            model = %self.config.model_name,
            finish_reason = parsed.finish_reason.as_deref().unwrap_or("unknown"),
            "Completion finished in {:.3}s",
            total_time
        );

        Ok(parsed)
    }
}
