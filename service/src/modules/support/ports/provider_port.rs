use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::super::domain::{SentimentLabel, SentimentResult};

/// 能力提供方错误类型（分类器、生成器）
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {code} - {message}")]
    ApiError { code: String, message: String },

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider not available: {0}")]
    ProviderNotAvailable(String),
}

impl ProviderError {
    /// 将 reqwest 错误归类（超时与其他网络故障同等对待，只是信息更明确）
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(timeout_secs)
        } else {
            ProviderError::NetworkError(err.to_string())
        }
    }
}

/// 远程能力提供方配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEndpoint {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 分类器原始标签到情绪的映射（如二分类模型的 `LABEL_1` -> positive）
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, SentimentLabel>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ProviderEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: String::new(),
            model: String::new(),
            timeout_secs: default_timeout_secs(),
            labels: HashMap::new(),
        }
    }

    pub fn with_label(mut self, raw: impl Into<String>, label: SentimentLabel) -> Self {
        self.labels.insert(raw.into(), label);
        self
    }

    /// 解析分类器标签，配置的映射优先（忽略大小写），否则按三分类约定
    pub fn sentiment_label(&self, raw: &str) -> SentimentLabel {
        let raw = raw.trim();
        self.labels
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(raw))
            .map(|(_, label)| *label)
            .unwrap_or_else(|| SentimentLabel::from_provider_label(raw))
    }

    /// 拼接 API URL
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

/// 情绪分类端口
///
/// 可能很慢（模型推理），对流水线而言是一次阻塞调用
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// 提供方名称（用于日志）
    fn name(&self) -> &str;

    /// 分类文本情绪
    async fn classify(&self, text: &str) -> Result<SentimentResult, ProviderError>;
}

/// 回复生成端口
///
/// 可能返回空字符串；对内容质量不做约定，只约定可用性
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// 生成回复
    async fn generate(&self, text: &str) -> Result<String, ProviderError>;
}
