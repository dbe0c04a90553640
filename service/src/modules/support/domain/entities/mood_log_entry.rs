use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::value_objects::{MoodEntryId, SentimentLabel, SentimentResult, UserId};

/// 情绪日志条目
///
/// 每处理一条消息创建一次，只追加，不修改也不删除
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodLogEntry {
    id: MoodEntryId,
    user: UserId,
    sentiment: SentimentLabel,
    confidence: f32,
    timestamp: DateTime<Utc>,
}

impl MoodLogEntry {
    /// 以当前时间创建条目
    pub fn record(user: UserId, sentiment: SentimentResult) -> Self {
        Self::at(user, sentiment, Utc::now())
    }

    /// 以指定时间创建条目
    pub fn at(user: UserId, sentiment: SentimentResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: MoodEntryId::new(),
            user,
            sentiment: sentiment.label(),
            confidence: sentiment.confidence(),
            timestamp,
        }
    }

    // Getters
    pub fn id(&self) -> MoodEntryId {
        self.id
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn sentiment(&self) -> SentimentLabel {
        self.sentiment
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_copies_sentiment() {
        let entry = MoodLogEntry::record(
            UserId::from("alice"),
            SentimentResult::new(SentimentLabel::Positive, 0.93),
        );

        assert_eq!(entry.user().as_str(), "alice");
        assert_eq!(entry.sentiment(), SentimentLabel::Positive);
        assert!((entry.confidence() - 0.93).abs() < 1e-6);
    }
}
