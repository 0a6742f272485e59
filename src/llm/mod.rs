//! Chat-completion clients used to phrase answers from retrieved context
//!
//! Supports OpenAI-compatible `/chat/completions` endpoints and Ollama's
//! `/api/chat`.

pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::config::LlmConfig;
use crate::errors::ResumeRagError;
use crate::errors::Result;

/// Single chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a conversation and return the assistant's reply
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    Ollama,
}

impl LlmBackend {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            other => Err(ResumeRagError::Config(format!("Unknown LLM provider: {other}"))),
        }
    }
}

pub struct LlmService {
    backend: LlmBackend,
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: usize,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: usize,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: ChatMessage,
}

impl LlmService {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResumeRagError::Http(e.to_string()))?;

        Ok(Self {
            backend: LlmBackend::parse(&config.provider)?,
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call_openai(&self, messages: &[ChatMessage]) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ResumeRagError::Config("OpenAI API key not provided".to_string()))?;
        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions: {} ({} messages)", url, messages.len());

        let request = OpenAIRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ResumeRagError::Llm(format!("OpenAI API error ({status}): {error_text}")));
        }

        let body: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ResumeRagError::Llm(format!("Failed to parse response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ResumeRagError::Llm("Empty completion".to_string()))
    }

    async fn call_ollama(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/api/chat", self.endpoint);
        debug!("Calling Ollama chat: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            messages,
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ResumeRagError::Llm(format!("Ollama API error ({status}): {error_text}")));
        }

        let body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| ResumeRagError::Llm(format!("Failed to parse response: {e}")))?;

        if body.message.content.trim().is_empty() {
            return Err(ResumeRagError::Llm("Empty completion".to_string()));
        }
        Ok(body.message.content)
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        match self.backend {
            LlmBackend::OpenAI => self.call_openai(messages).await,
            LlmBackend::Ollama => self.call_ollama(messages).await,
        }
    }
}

pub fn from_config(config: &AppConfig) -> Result<Option<Arc<dyn TextGenerator>>> {
    if !config.llm_configured() {
        tracing::info!("LLM not configured; answers will be templated");
        return Ok(None);
    }
    let service = LlmService::new(&config.llm)?;
    tracing::info!("Answer generator ready: {}", service.model());
    Ok(Some(Arc::new(service)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_request_shape() {
        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hi")];
        let body = serde_json::to_value(OpenAIRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 800,
        })
        .unwrap();

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["max_tokens"], 800);
    }

    #[test]
    fn test_openai_response_parsing() {
        let body: OpenAIResponse = serde_json::from_str(
            r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "I know Rust."}}]}"#,
        )
        .unwrap();
        assert_eq!(body.choices[0].message.content.as_deref(), Some("I know Rust."));
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(LlmBackend::parse("ollama").unwrap(), LlmBackend::Ollama);
        assert!(LlmBackend::parse("bard").is_err());
    }

    #[test]
    fn test_from_config() {
        let mut config = AppConfig::default();
        assert!(from_config(&config).unwrap().is_none());

        config.llm.api_key = Some("sk-test".to_string());
        assert!(from_config(&config).unwrap().is_some());
    }
}
