// Config Domain Entities
//
// 配置领域实体定义

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::modules::support::domain::{
    CatalogConfig, ResponseCatalog, DEFAULT_ESCALATION_THRESHOLD, DEFAULT_LANGUAGE, GLOBAL_REGION,
};
use crate::modules::support::ports::ProviderEndpoint;

/// 情绪趋势最多返回的条数
pub const MAX_TREND_LIMIT: usize = 30;

/// 通用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralConfig {
    pub default_language: String,
    pub default_region: String,
    /// 情绪日志和对话记录的存放目录
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            default_region: GLOBAL_REGION.to_string(),
            data_dir: PathBuf::from("data"),
        }
    }
}

/// 流水线配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    pub escalation_threshold: f32,
    pub trend_limit: usize,
    pub translation_enabled: bool,
    pub persistence_enabled: bool,
    pub overlap_providers: bool,
    pub strict_providers: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            escalation_threshold: DEFAULT_ESCALATION_THRESHOLD,
            trend_limit: MAX_TREND_LIMIT,
            translation_enabled: true,
            persistence_enabled: true,
            overlap_providers: true,
            strict_providers: false,
        }
    }
}

/// 远程能力提供方
///
/// 未配置的一项使用本地实现
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub classifier: Option<ProviderEndpoint>,
    pub generator: Option<ProviderEndpoint>,
    pub translator: Option<ProviderEndpoint>,
}

/// 应用配置聚合根
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub pipeline: PipelineConfig,
    pub providers: ProvidersConfig,
    /// 覆盖内置回复目录
    pub catalog: Option<CatalogConfig>,
}

impl AppConfig {
    /// 创建新的默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并部分配置更新
    pub fn merge(&mut self, partial: PartialAppConfig) {
        if let Some(general) = partial.general {
            if let Some(default_language) = general.default_language {
                self.general.default_language = default_language;
            }
            if let Some(default_region) = general.default_region {
                self.general.default_region = default_region;
            }
            if let Some(data_dir) = general.data_dir {
                self.general.data_dir = data_dir;
            }
        }

        if let Some(pipeline) = partial.pipeline {
            if let Some(threshold) = pipeline.escalation_threshold {
                self.pipeline.escalation_threshold = threshold;
            }
            if let Some(trend_limit) = pipeline.trend_limit {
                self.pipeline.trend_limit = trend_limit;
            }
            if let Some(enabled) = pipeline.translation_enabled {
                self.pipeline.translation_enabled = enabled;
            }
            if let Some(enabled) = pipeline.persistence_enabled {
                self.pipeline.persistence_enabled = enabled;
            }
            if let Some(overlap) = pipeline.overlap_providers {
                self.pipeline.overlap_providers = overlap;
            }
            if let Some(strict) = pipeline.strict_providers {
                self.pipeline.strict_providers = strict;
            }
        }

        if let Some(providers) = partial.providers {
            self.providers = providers;
        }

        if let Some(catalog) = partial.catalog {
            self.catalog = Some(catalog);
        }
    }

    /// 验证配置是否有效
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.general.default_language.trim().is_empty() {
            errors.push("Default language must not be empty".to_string());
        }

        let threshold = self.pipeline.escalation_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            errors.push("Escalation threshold must be between 0 and 1".to_string());
        }

        if self.pipeline.trend_limit == 0 || self.pipeline.trend_limit > MAX_TREND_LIMIT {
            errors.push(format!("Trend limit must be between 1 and {}", MAX_TREND_LIMIT));
        }

        let endpoints = [
            ("classifier", &self.providers.classifier),
            ("generator", &self.providers.generator),
            ("translator", &self.providers.translator),
        ];
        for (name, endpoint) in endpoints {
            if let Some(endpoint) = endpoint {
                if endpoint.base_url.trim().is_empty() {
                    errors.push(format!("Provider {} has an empty base URL", name));
                }
                if endpoint.timeout_secs == 0 {
                    errors.push(format!("Provider {} timeout must be positive", name));
                }
            }
        }

        if let Some(catalog) = &self.catalog {
            if let Err(e) = ResponseCatalog::from_config(catalog.clone()) {
                errors.push(format!("Invalid catalog: {}", e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// 部分配置更新（用于合并）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialAppConfig {
    pub general: Option<PartialGeneralConfig>,
    pub pipeline: Option<PartialPipelineConfig>,
    /// 整体替换
    pub providers: Option<ProvidersConfig>,
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialGeneralConfig {
    pub default_language: Option<String>,
    pub default_region: Option<String>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialPipelineConfig {
    pub escalation_threshold: Option<f32>,
    pub trend_limit: Option<usize>,
    pub translation_enabled: Option<bool>,
    pub persistence_enabled: Option<bool>,
    pub overlap_providers: Option<bool>,
    pub strict_providers: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.general.default_language, "en");
        assert_eq!(config.general.default_region, "Global");
        assert!((config.pipeline.escalation_threshold - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.pipeline.trend_limit, 30);
        assert!(config.providers.generator.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_merge() {
        let mut config = AppConfig::default();
        let partial = PartialAppConfig {
            pipeline: Some(PartialPipelineConfig {
                persistence_enabled: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };

        config.merge(partial);
        assert!(!config.pipeline.persistence_enabled);
        // 其他字段保持不变
        assert!(config.pipeline.translation_enabled);
        assert_eq!(config.general.default_language, "en");
    }

    #[test]
    fn test_app_config_validate() {
        let mut config = AppConfig::default();
        config.pipeline.escalation_threshold = 1.5;
        config.pipeline.trend_limit = 0;
        config.providers.generator = Some(ProviderEndpoint::new(""));

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"pipeline":{"escalationThreshold":0.8}}"#).unwrap();

        assert!((config.pipeline.escalation_threshold - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.pipeline.trend_limit, 30);
        assert_eq!(config.general.default_region, "Global");
    }
}
