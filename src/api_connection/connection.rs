use dotenv::dotenv;
use reqwest::Client;
use std::env;
use thiserror::Error;

use super::endpoints::{
    strip_markdown_fences, ChatCompletionRequest, ChatCompletionResponse, Provider, OPENAI_MODELS,
};

const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API error {status}: {error_body}")]
    Api {
        status: reqwest::StatusCode,
        error_body: String,
    },

    #[error("API returned no usable content: {0}")]
    EmptyResponse(String),
}

impl Provider {
    pub fn openai(api_key_env_var: &str) -> Self {
        dotenv().ok();
        Self::OpenAi {
            api_key_env_var: api_key_env_var.to_string(),
            available_models: OPENAI_MODELS.to_vec(),
        }
    }

    pub async fn call_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        match self {
            Provider::OpenAi { api_key_env_var, .. } => {
                dotenv().ok();
                let api_key = env::var(api_key_env_var)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var.clone()))?;

                let client = Client::new();
                let response = client
                    .post(OPENAI_CHAT_COMPLETIONS_URL)
                    .bearer_auth(api_key)
                    .header("Content-Type", "application/json")
                    .json(&request)
                    .send()
                    .await?;

                if response.status().is_success() {
                    Ok(response.json::<ChatCompletionResponse>().await?)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    Err(ApiConnectionError::Api { status, error_body })
                }
            }
        }
    }

    /// One chat-completion round trip returning the first choice's content
    /// with markdown fences already stripped. Both LLM passes (menu
    /// extraction and strategy generation) consume responses through this.
    pub async fn call_for_content(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<String, ApiConnectionError> {
        let response = self.call_chat_completion(request).await?;
        let choice = response.choices.first().ok_or_else(|| {
            ApiConnectionError::EmptyResponse("no response choices received".to_string())
        })?;
        let content = strip_markdown_fences(&choice.message.content);
        if content.is_empty() {
            return Err(ApiConnectionError::EmptyResponse(
                "response content empty after stripping markdown".to_string(),
            ));
        }
        Ok(content)
    }
}
