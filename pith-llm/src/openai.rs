use crate::traits::{LlmClient, LlmResponse};
use async_trait::async_trait;
use pith_common::{PithError, Result};
use pith_http::{HttpClient, HttpError};
use serde::{Deserialize, Serialize};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1/";

pub struct OpenAiClient {
    client: HttpClient,
    api_key: String,
    model: String,
    json_mode: bool,
}

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One element in the `choices` array
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

impl OpenAiClient {
    /// Create a new client for the given API key and model.
    pub fn new(api_key: String, model: String) -> std::result::Result<Self, HttpError> {
        Self::with_base(OPENAI_API_BASE, api_key, model)
    }

    /// Point the client at an OpenAI-compatible endpoint (gateways, mocks).
    pub fn with_base(
        base: &str,
        api_key: String,
        model: String,
    ) -> std::result::Result<Self, HttpError> {
        let client = HttpClient::new(base)?;
        Ok(Self {
            client,
            api_key,
            model,
            json_mode: false,
        })
    }

    /// Ask the provider for a JSON-object response on every request.
    pub fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let req = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            response_format: self.json_mode.then(|| ResponseFormat {
                kind: "json_object".to_string(),
            }),
            max_tokens,
            temperature,
        };

        let resp: ChatCompletionResponse = self
            .client
            .post_json("chat/completions", Some(&self.api_key), &req)
            .await
            .map_err(http_to_pith)?;

        let text = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        tracing::debug!(model = %resp.model, chars = text.len(), "openai.generate.done");

        Ok(LlmResponse {
            text,
            model: Some(resp.model),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn http_to_pith(e: HttpError) -> PithError {
    PithError::Oracle(format!("{e}"))
}
