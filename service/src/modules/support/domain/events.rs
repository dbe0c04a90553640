use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{LanguageCode, RegionCode, SentimentLabel, UserId};

/// 领域事件基础 trait
pub trait DomainEvent: Clone + Send + Sync {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> DateTime<Utc>;
}

/// 回复生成事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyProducedEvent {
    pub user: UserId,
    pub sentiment: SentimentLabel,
    pub confidence: f32,
    /// 是否使用了目录中的预设回复
    pub used_fallback: bool,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for ReplyProducedEvent {
    fn event_type(&self) -> &'static str {
        "reply.produced"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 求助资源升级事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationTriggeredEvent {
    pub user: UserId,
    pub region: RegionCode,
    pub resource_name: String,
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for EscalationTriggeredEvent {
    fn event_type(&self) -> &'static str {
        "escalation.triggered"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 情绪日志写入失败事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodLogFailedEvent {
    pub user: UserId,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for MoodLogFailedEvent {
    fn event_type(&self) -> &'static str {
        "mood_log.failed"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 回译降级事件（返回了未翻译的回复）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationDegradedEvent {
    pub user: UserId,
    pub language: LanguageCode,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for TranslationDegradedEvent {
    fn event_type(&self) -> &'static str {
        "translation.degraded"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 情绪支持模块事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SupportEvent {
    ReplyProduced(ReplyProducedEvent),
    EscalationTriggered(EscalationTriggeredEvent),
    MoodLogFailed(MoodLogFailedEvent),
    TranslationDegraded(TranslationDegradedEvent),
}

impl SupportEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            SupportEvent::ReplyProduced(e) => e.event_type(),
            SupportEvent::EscalationTriggered(e) => e.event_type(),
            SupportEvent::MoodLogFailed(e) => e.event_type(),
            SupportEvent::TranslationDegraded(e) => e.event_type(),
        }
    }
}
