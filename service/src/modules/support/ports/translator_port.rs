use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::LanguageCode;

/// 翻译错误类型
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Translation network error: {0}")]
    NetworkError(String),

    #[error("Translation API error: {code} - {message}")]
    ApiError { code: String, message: String },

    #[error("Translation timed out after {0}s")]
    Timeout(u64),

    #[error("Invalid translation response: {0}")]
    InvalidResponse(String),
}

/// 翻译端口
///
/// 来回翻译不保证逐字节还原原文
#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    /// 把文本翻译成目标语言
    async fn translate(&self, text: &str, to: &LanguageCode) -> Result<String, TranslationError>;
}
