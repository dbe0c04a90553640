// Support Application Layer - 应用层
// 实现 CQRS 模式的命令和查询处理器

pub mod commands;
pub mod dto;
pub mod queries;

// 导出命令和查询
pub use commands::*;
pub use dto::*;
pub use queries::*;

use async_trait::async_trait;
use thiserror::Error;

use super::ports::{ProviderError, RepositoryError, TranslationError};

/// 应用层错误类型
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 空消息：在任何提供方调用之前拒绝，无副作用
    #[error("Please type something!")]
    EmptyInput,

    /// 输入归一化时翻译失败，请求终止
    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// 严格模式下分类器或生成器不可用
    #[error("Provider unavailable: {0}")]
    Provider(#[from] ProviderError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// 命令处理器 trait
///
/// 遵循 CQRS 模式，命令处理器负责执行有副作用的操作
#[async_trait]
pub trait CommandHandler<C, R>: Send + Sync
where
    C: Send + Sync,
{
    /// 执行命令
    async fn handle(&self, command: C) -> Result<R, ApplicationError>;
}

/// 查询处理器 trait
///
/// 遵循 CQRS 模式，查询处理器负责只读操作
#[async_trait]
pub trait QueryHandler<Q, R>: Send + Sync
where
    Q: Send + Sync,
{
    /// 执行查询
    async fn handle(&self, query: Q) -> Result<R, ApplicationError>;
}
