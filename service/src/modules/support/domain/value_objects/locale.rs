use serde::{Deserialize, Serialize};
use std::fmt;

/// 默认语言（分类器和生成器都只处理这种语言）
pub const DEFAULT_LANGUAGE: &str = "en";

/// 全球通用资源的地区标记
pub const GLOBAL_REGION: &str = "Global";

/// 语言代码（ISO 639-1）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// 创建语言代码，统一转为小写，空串视为默认语言
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into().trim().to_lowercase();
        if code.is_empty() {
            Self::default()
        } else {
            Self(code)
        }
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// 地区代码
///
/// 资源目录按地区过滤，`Global` 表示所有地区均可用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCode(String);

impl RegionCode {
    /// 创建地区代码，空串视为 `Global`
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            Self::global()
        } else {
            Self(code)
        }
    }

    pub fn global() -> Self {
        Self(GLOBAL_REGION.to_string())
    }

    pub fn is_global(&self) -> bool {
        self.0 == GLOBAL_REGION
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for RegionCode {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RegionCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_normalization() {
        assert_eq!(LanguageCode::new("FR").code(), "fr");
        assert_eq!(LanguageCode::new("  ").code(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_region_defaults_to_global() {
        assert!(RegionCode::new("").is_global());
        assert!(!RegionCode::new("US").is_global());
    }
}
