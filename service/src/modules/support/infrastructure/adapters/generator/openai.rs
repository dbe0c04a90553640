// OpenAI 兼容回复生成器
//
// 调用 chat/completions 接口（非流式），只取第一个 choice

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::modules::support::ports::{ProviderEndpoint, ProviderError, ResponseGenerator};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a warm, empathetic listener. Reply briefly and \
supportively to the user's message. Do not give medical advice.";

/// OpenAI API 请求格式
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: String,
}

/// OpenAI API 响应格式
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

/// OpenAI 兼容回复生成器
pub struct OpenAiResponseGenerator {
    endpoint: ProviderEndpoint,
    system_prompt: String,
    max_tokens: Option<u32>,
    client: Client,
}

impl OpenAiResponseGenerator {
    pub fn new(endpoint: ProviderEndpoint) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(Self {
            endpoint,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: Some(200),
            client,
        })
    }

    /// 设置系统提示词
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    fn to_request(&self, text: &str) -> OpenAIRequest {
        OpenAIRequest {
            model: self.endpoint.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: self.system_prompt.clone(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl ResponseGenerator for OpenAiResponseGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, text: &str) -> Result<String, ProviderError> {
        debug!("Sending generation request: model={}", self.endpoint.model);

        let response = self
            .client
            .post(self.endpoint.url("chat/completions"))
            .header("Authorization", format!("Bearer {}", self.endpoint.api_key))
            .header("Content-Type", "application/json")
            .json(&self.to_request(text))
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.endpoint.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Generation API error: {} - {}", status, error_text);
            return Err(ProviderError::ApiError {
                code: status.as_str().to_string(),
                message: error_text,
            });
        }

        let body: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        // 没有 choice 视为空输出，由流水线回退到预设回复
        Ok(body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}
