use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 情绪标签
///
/// 值对象：分类器给出的离散情绪类别，只有三种取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// 积极
    Positive,
    /// 消极
    Negative,
    /// 中性
    Neutral,
}

impl SentimentLabel {
    /// 获取所有情绪标签
    pub fn all() -> &'static [SentimentLabel] {
        &[
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
        ]
    }

    /// 小写名称（对外输出格式）
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// 宽松解析：无法识别的标签一律视为中性
    ///
    /// 兼容 `POSITIVE` / `LABEL_0` 等常见模型输出。`LABEL_n` 按三分类模型
    /// （0 消极、1 中性、2 积极）解释；二分类模型需在端点配置 `labels` 映射
    pub fn from_provider_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" | "pos" | "label_2" => SentimentLabel::Positive,
            "negative" | "neg" | "label_0" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

impl Default for SentimentLabel {
    fn default() -> Self {
        Self::Neutral
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            _ => Err(format!("Unknown sentiment: {}", s)),
        }
    }
}

/// 情绪分析结果
///
/// 每条消息只产生一次，创建后不可变。置信度始终落在 [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    label: SentimentLabel,
    confidence: f32,
}

impl SentimentResult {
    /// 创建结果，置信度会被截断到 [0, 1]，NaN 记为 0
    pub fn new(label: SentimentLabel, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self { label, confidence }
    }

    /// 分类器无法判断时的约定结果：中性，置信度 0
    pub fn undecided() -> Self {
        Self::new(SentimentLabel::Neutral, 0.0)
    }

    pub fn label(&self) -> SentimentLabel {
        self.label
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// 保留两位小数的置信度
    pub fn rounded_confidence(&self) -> f32 {
        (self.confidence * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(SentimentResult::new(SentimentLabel::Positive, 1.7).confidence(), 1.0);
        assert_eq!(SentimentResult::new(SentimentLabel::Negative, -0.2).confidence(), 0.0);
        assert_eq!(SentimentResult::new(SentimentLabel::Neutral, f32::NAN).confidence(), 0.0);
    }

    #[test]
    fn test_provider_label_parsing() {
        assert_eq!(SentimentLabel::from_provider_label("POSITIVE"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_provider_label("NEGATIVE"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_provider_label("mixed"), SentimentLabel::Neutral);
    }

    #[test]
    fn test_rounded_confidence() {
        let result = SentimentResult::new(SentimentLabel::Negative, 0.8567);
        assert!((result.rounded_confidence() - 0.86).abs() < 1e-6);
    }
}
