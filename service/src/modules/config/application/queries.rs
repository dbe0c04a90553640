// Config Queries
//
// 配置相关的查询处理器

use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::config::domain::AppConfig;
use crate::modules::config::ports::{ConfigError, ConfigRepository};

/// 查询处理器 trait
#[async_trait]
pub trait QueryHandler<Q> {
    type Output;
    type Error;

    async fn handle(&self, query: Q) -> Result<Self::Output, Self::Error>;
}

/// 获取全部配置查询
#[derive(Debug, Clone, Default)]
pub struct GetConfigQuery;

/// 获取配置查询处理器
pub struct GetConfigHandler {
    repository: Arc<dyn ConfigRepository>,
}

impl GetConfigHandler {
    pub fn new(repository: Arc<dyn ConfigRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl QueryHandler<GetConfigQuery> for GetConfigHandler {
    type Output = AppConfig;
    type Error = ConfigError;

    async fn handle(&self, _query: GetConfigQuery) -> Result<Self::Output, Self::Error> {
        let config = self.repository.load().await?;

        // 文件被手工改坏时尽早暴露
        config
            .validate()
            .map_err(|errors| ConfigError::ValidationError { errors })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::config::infrastructure::InMemoryConfigRepository;

    #[tokio::test]
    async fn test_get_config_handler() {
        let repo = Arc::new(InMemoryConfigRepository::new());
        let handler = GetConfigHandler::new(repo);

        let config = handler.handle(GetConfigQuery).await.unwrap();
        assert_eq!(config.general.default_language, "en");
    }

    #[tokio::test]
    async fn test_invalid_stored_config_is_rejected() {
        let mut config = AppConfig::default();
        config.pipeline.escalation_threshold = -1.0;
        let handler = GetConfigHandler::new(Arc::new(InMemoryConfigRepository::with_config(config)));

        let result = handler.handle(GetConfigQuery).await;
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
