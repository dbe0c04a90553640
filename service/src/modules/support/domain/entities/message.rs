use super::super::value_objects::{LanguageCode, RegionCode, UserId};

/// 入站消息
///
/// 每次请求临时构造，不直接持久化
#[derive(Debug, Clone)]
pub struct Message {
    /// 发送者
    author: UserId,
    /// 原始文本
    text: String,
    /// 用户使用的语言
    language: LanguageCode,
    /// 用户所在地区（未指定时按 Global 处理）
    region: Option<RegionCode>,
}

impl Message {
    pub fn new(
        author: UserId,
        text: impl Into<String>,
        language: LanguageCode,
        region: Option<RegionCode>,
    ) -> Self {
        Self {
            author,
            text: text.into(),
            language,
            region,
        }
    }

    pub fn author(&self) -> &UserId {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn region(&self) -> Option<&RegionCode> {
        self.region.as_ref()
    }

    /// 去掉首尾空白后是否为空
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// 实际用于资源过滤的地区
    /// 未指定地区时使用 `fallback`
    pub fn region_or(&self, fallback: &RegionCode) -> RegionCode {
        self.region.clone().unwrap_or_else(|| fallback.clone())
    }
}
