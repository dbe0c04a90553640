use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::super::entities::Resource;
use super::super::value_objects::{RegionCode, SentimentLabel};

/// 目录配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Neutral reply set must not be empty")]
    EmptyNeutralSet,

    #[error("Empty reply text for sentiment: {0}")]
    EmptyReply(SentimentLabel),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),
}

/// 目录的可序列化形式（用于配置文件）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    pub replies: HashMap<SentimentLabel, Vec<String>>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let mut replies = HashMap::new();
        replies.insert(
            SentimentLabel::Positive,
            vec![
                "Great to hear you're doing well!".to_string(),
                "Love the positive energy!".to_string(),
                "I'm glad you're feeling good! Want to share more?".to_string(),
                "That's awesome to hear! What's got you in such a great mood?".to_string(),
            ],
        );
        replies.insert(
            SentimentLabel::Negative,
            vec![
                "I'm here for you. Want to talk more?".to_string(),
                "That sounds tough. I'm listening.".to_string(),
                "It sounds like you're having a tough time. I'm listening if you need me."
                    .to_string(),
                "I'm sorry you're feeling down. Can I help with anything?".to_string(),
            ],
        );
        replies.insert(
            SentimentLabel::Neutral,
            vec![
                "Thanks for sharing! What's on your mind?".to_string(),
                "All good? Let's chat.".to_string(),
                "Thanks for sharing! How can I support you today?".to_string(),
            ],
        );

        Self {
            replies,
            resources: vec![
                Resource::new(
                    "Crisis Text Line",
                    "https://www.crisistextline.org",
                    RegionCode::from("US"),
                ),
                Resource::new("NAMI", "https://www.nami.org", RegionCode::from("US")),
                Resource::new(
                    "BetterHelp",
                    "https://www.betterhelp.com",
                    RegionCode::global(),
                ),
            ],
        }
    }
}

/// 回复目录
///
/// 领域服务：按情绪标签提供候选回复，按地区提供求助资源。
/// 启动时加载一次，之后只读；目录本身不做随机选择
#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    replies: HashMap<SentimentLabel, Vec<String>>,
    resources: Vec<Resource>,
}

impl ResponseCatalog {
    /// 从配置构建并校验目录
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        let neutral_ok = config
            .replies
            .get(&SentimentLabel::Neutral)
            .map(|set| !set.is_empty())
            .unwrap_or(false);
        if !neutral_ok {
            return Err(CatalogError::EmptyNeutralSet);
        }

        for (label, set) in &config.replies {
            if set.iter().any(|r| r.trim().is_empty()) {
                return Err(CatalogError::EmptyReply(*label));
            }
        }

        for resource in &config.resources {
            if resource.name.trim().is_empty() || resource.url.trim().is_empty() {
                return Err(CatalogError::InvalidResource(format!(
                    "name={:?}, url={:?}",
                    resource.name, resource.url
                )));
            }
        }

        // 空集合等同于未配置，查询时回退到中性
        let replies = config
            .replies
            .into_iter()
            .filter(|(_, set)| !set.is_empty())
            .collect();

        Ok(Self {
            replies,
            resources: config.resources,
        })
    }

    /// 候选回复；标签没有条目时返回中性集合（始终非空）
    pub fn replies_for(&self, label: SentimentLabel) -> &[String] {
        self.replies
            .get(&label)
            .or_else(|| self.replies.get(&SentimentLabel::Neutral))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 按名称查询候选回复，未知名称按中性处理
    pub fn replies_for_name(&self, name: &str) -> &[String] {
        match name.parse::<SentimentLabel>() {
            Ok(label) => self.replies_for(label),
            Err(_) => self.replies_for(SentimentLabel::Neutral),
        }
    }

    /// 对指定地区可用的资源（Global + 该地区），可能为空
    pub fn resources_for(&self, region: &RegionCode) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.is_available_in(region))
            .collect()
    }

    /// 全部资源
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        let config = CatalogConfig::default();
        Self {
            replies: config.replies,
            resources: config.resources,
        }
    }
}
