// Config Service
//
// 配置服务门面，提供统一的 API

use std::sync::Arc;

use super::{
    CommandHandler, GetConfigHandler, GetConfigQuery, QueryHandler, ResetConfigCommand,
    ResetConfigHandler, SaveConfigCommand, SaveConfigHandler, UpdateConfigCommand,
    UpdateConfigHandler,
};
use crate::modules::config::domain::{AppConfig, PartialAppConfig};
use crate::modules::config::infrastructure::{FileConfigRepository, InMemoryConfigRepository};
use crate::modules::config::ports::{ConfigError, ConfigRepository};

/// 配置服务实现
pub struct ConfigService {
    repository: Arc<dyn ConfigRepository>,
    // Handlers
    get_handler: GetConfigHandler,
    save_handler: SaveConfigHandler,
    update_handler: UpdateConfigHandler,
    reset_handler: ResetConfigHandler,
}

impl ConfigService {
    pub fn new(repository: Arc<dyn ConfigRepository>) -> Self {
        Self {
            get_handler: GetConfigHandler::new(repository.clone()),
            save_handler: SaveConfigHandler::new(repository.clone()),
            update_handler: UpdateConfigHandler::new(repository.clone()),
            reset_handler: ResetConfigHandler::new(repository.clone()),
            repository,
        }
    }

    /// 使用内存仓储创建（用于测试）
    pub fn new_in_memory() -> Self {
        Self::new(Arc::new(InMemoryConfigRepository::new()))
    }

    /// 使用指定的 JSON 文件创建
    pub fn from_file(path: std::path::PathBuf) -> Self {
        Self::new(Arc::new(FileConfigRepository::at_path(path)))
    }

    /// 获取仓储引用
    pub fn repository(&self) -> &Arc<dyn ConfigRepository> {
        &self.repository
    }

    /// 加载并校验配置
    pub async fn load(&self) -> Result<AppConfig, ConfigError> {
        self.get_handler.handle(GetConfigQuery).await
    }

    /// 校验后整体保存
    pub async fn save(&self, config: AppConfig) -> Result<(), ConfigError> {
        self.save_handler.handle(SaveConfigCommand { config }).await
    }

    /// 合并部分配置并保存
    pub async fn update(&self, partial: PartialAppConfig) -> Result<AppConfig, ConfigError> {
        let response = self
            .update_handler
            .handle(UpdateConfigCommand::new(partial))
            .await?;
        Ok(response.config)
    }

    /// 恢复默认配置
    pub async fn reset(&self) -> Result<AppConfig, ConfigError> {
        let response = self.reset_handler.handle(ResetConfigCommand).await?;
        Ok(response.config)
    }
}
