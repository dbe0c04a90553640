//! 远程翻译 HTTP 客户端
//!
//! 兼容 Google Cloud Translation v2 的 REST 接口。

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::modules::support::domain::LanguageCode;
use crate::modules::support::ports::{ProviderEndpoint, TranslationError, Translator};

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// 远程翻译客户端
#[derive(Clone)]
pub struct HttpTranslator {
    endpoint: ProviderEndpoint,
    http: Client,
}

impl HttpTranslator {
    /// 创建新的客户端
    ///
    /// # Arguments
    /// * `endpoint` - 服务地址、API 密钥和超时
    pub fn new(endpoint: ProviderEndpoint) -> Result<Self, TranslationError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| TranslationError::NetworkError(e.to_string()))?;

        Ok(Self { endpoint, http })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    fn name(&self) -> &str {
        "http"
    }

    async fn translate(&self, text: &str, to: &LanguageCode) -> Result<String, TranslationError> {
        let url = self.endpoint.url("language/translate/v2");
        debug!("Translating {} chars to {}", text.chars().count(), to);

        let mut request_builder = self.http.post(&url).json(&TranslateRequest {
            q: text,
            target: to.code(),
            format: "text",
        });

        // 如果有 API 密钥，作为查询参数传递
        if !self.endpoint.api_key.is_empty() {
            request_builder = request_builder.query(&[("key", self.endpoint.api_key.as_str())]);
        }

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TranslationError::Timeout(self.endpoint.timeout_secs)
            } else {
                TranslationError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Translation API error: {} - {}", status, error_text);
            return Err(TranslationError::ApiError {
                code: status.as_str().to_string(),
                message: error_text,
            });
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        body.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| TranslationError::InvalidResponse("No translations".to_string()))
    }
}
