use async_trait::async_trait;
use pith_common::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub model: Option<String>,
}

/// Provider-agnostic text generation interface.
///
/// Object-safe so callers can hold `Arc<dyn LlmClient>` and tests can swap
/// in deterministic stand-ins.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a response to the given prompt with optional system prompt.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;

    /// Check if the LLM service is reachable.
    async fn health_check(&self) -> Result<bool> {
        let test_prompt = "Respond with just 'OK'";
        match self.generate(test_prompt, None, Some(5), Some(0.1)).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("LLM health check failed: {}", e);
                Ok(false)
            }
        }
    }
}
