// Config Commands
//
// 配置相关的命令处理器

use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::config::domain::{AppConfig, PartialAppConfig};
use crate::modules::config::ports::{ConfigError, ConfigRepository};

/// 命令处理器 trait
#[async_trait]
pub trait CommandHandler<C> {
    type Output;
    type Error;

    async fn handle(&self, command: C) -> Result<Self::Output, Self::Error>;
}

// ============================================================================
// Save Config Command
// ============================================================================

/// 整体保存配置命令
#[derive(Debug, Clone)]
pub struct SaveConfigCommand {
    pub config: AppConfig,
}

/// 保存配置命令处理器
pub struct SaveConfigHandler {
    repository: Arc<dyn ConfigRepository>,
}

impl SaveConfigHandler {
    pub fn new(repository: Arc<dyn ConfigRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<SaveConfigCommand> for SaveConfigHandler {
    type Output = ();
    type Error = ConfigError;

    async fn handle(&self, command: SaveConfigCommand) -> Result<Self::Output, Self::Error> {
        command
            .config
            .validate()
            .map_err(|errors| ConfigError::ValidationError { errors })?;

        self.repository.save(&command.config).await
    }
}

// ============================================================================
// Update Config Command
// ============================================================================

/// 更新配置命令
#[derive(Debug, Clone)]
pub struct UpdateConfigCommand {
    pub partial: PartialAppConfig,
}

impl UpdateConfigCommand {
    pub fn new(partial: PartialAppConfig) -> Self {
        Self { partial }
    }
}

/// 更新配置响应
#[derive(Debug, Clone)]
pub struct UpdateConfigResponse {
    pub config: AppConfig,
}

/// 更新配置命令处理器
pub struct UpdateConfigHandler {
    repository: Arc<dyn ConfigRepository>,
}

impl UpdateConfigHandler {
    pub fn new(repository: Arc<dyn ConfigRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<UpdateConfigCommand> for UpdateConfigHandler {
    type Output = UpdateConfigResponse;
    type Error = ConfigError;

    async fn handle(&self, command: UpdateConfigCommand) -> Result<Self::Output, Self::Error> {
        let mut config = self.repository.load().await?;

        config.merge(command.partial);

        // 验证失败时不落盘
        config
            .validate()
            .map_err(|errors| ConfigError::ValidationError { errors })?;

        self.repository.save(&config).await?;

        Ok(UpdateConfigResponse { config })
    }
}

// ============================================================================
// Reset Config Command
// ============================================================================

/// 重置配置命令
#[derive(Debug, Clone)]
pub struct ResetConfigCommand;

/// 重置配置响应
#[derive(Debug, Clone)]
pub struct ResetConfigResponse {
    pub config: AppConfig,
}

/// 重置配置命令处理器
pub struct ResetConfigHandler {
    repository: Arc<dyn ConfigRepository>,
}

impl ResetConfigHandler {
    pub fn new(repository: Arc<dyn ConfigRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<ResetConfigCommand> for ResetConfigHandler {
    type Output = ResetConfigResponse;
    type Error = ConfigError;

    async fn handle(&self, _command: ResetConfigCommand) -> Result<Self::Output, Self::Error> {
        // 清除现有配置
        self.repository.clear().await?;

        // 加载默认配置
        let config = self.repository.load().await?;

        Ok(ResetConfigResponse { config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::config::domain::PartialPipelineConfig;
    use crate::modules::config::infrastructure::InMemoryConfigRepository;

    #[tokio::test]
    async fn test_update_config_handler() {
        let repo = Arc::new(InMemoryConfigRepository::new());
        let handler = UpdateConfigHandler::new(repo.clone());

        let command = UpdateConfigCommand::new(PartialAppConfig {
            pipeline: Some(PartialPipelineConfig {
                escalation_threshold: Some(0.8),
                ..Default::default()
            }),
            ..Default::default()
        });

        let response = handler.handle(command).await.unwrap();
        assert!((response.config.pipeline.escalation_threshold - 0.8).abs() < f32::EPSILON);

        let saved = repo.load().await.unwrap();
        assert!((saved.pipeline.escalation_threshold - 0.8).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_invalid_update_is_not_saved() {
        let repo = Arc::new(InMemoryConfigRepository::new());
        let handler = UpdateConfigHandler::new(repo.clone());

        let command = UpdateConfigCommand::new(PartialAppConfig {
            pipeline: Some(PartialPipelineConfig {
                trend_limit: Some(500),
                ..Default::default()
            }),
            ..Default::default()
        });

        let result = handler.handle(command).await;
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
        assert_eq!(repo.load().await.unwrap().pipeline.trend_limit, 30);
    }

    #[tokio::test]
    async fn test_reset_config_handler() {
        let mut config = AppConfig::default();
        config.pipeline.persistence_enabled = false;
        let repo = Arc::new(InMemoryConfigRepository::with_config(config));
        let handler = ResetConfigHandler::new(repo);

        let response = handler.handle(ResetConfigCommand).await.unwrap();

        assert!(response.config.pipeline.persistence_enabled);
    }
}
