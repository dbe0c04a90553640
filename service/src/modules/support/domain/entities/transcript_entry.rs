use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::value_objects::{SentimentLabel, UserId};
use super::reply::Reply;

/// 对话记录
///
/// 保存用户原始消息和最终回复，与情绪日志一样只追加
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub user: UserId,
    pub message: String,
    pub response: String,
    pub sentiment: SentimentLabel,
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(user: UserId, message: impl Into<String>, reply: &Reply) -> Self {
        Self {
            user,
            message: message.into(),
            response: reply.text().to_string(),
            sentiment: reply.sentiment().label(),
            confidence: reply.sentiment().confidence(),
            timestamp: Utc::now(),
        }
    }
}
