use super::super::value_objects::{SentimentLabel, SentimentResult};

/// 默认升级阈值
pub const DEFAULT_ESCALATION_THRESHOLD: f32 = 0.7;

/// 升级策略
///
/// 领域服务：判断回复是否需要附加求助资源。
/// 仅当情绪为消极且置信度严格大于阈值时升级
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscalationPolicy {
    threshold: f32,
}

impl EscalationPolicy {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn should_escalate(&self, sentiment: &SentimentResult) -> bool {
        sentiment.label() == SentimentLabel::Negative && sentiment.confidence() > self.threshold
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ESCALATION_THRESHOLD)
    }
}
