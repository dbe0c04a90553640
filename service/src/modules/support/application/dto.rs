use serde::{Deserialize, Serialize};

use super::ProcessMessageCommand;
use crate::modules::support::domain::{MoodLogEntry, Reply, TranscriptEntry, UserId};

/// 入站聊天请求
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl ChatRequest {
    /// 空白的语言、地区视为未指定
    pub fn into_command(self, user: impl Into<UserId>) -> ProcessMessageCommand {
        let mut command = ProcessMessageCommand::new(user, self.message);
        if let Some(language) = self.language.filter(|s| !s.trim().is_empty()) {
            command = command.with_language(language.trim());
        }
        if let Some(region) = self.region.filter(|s| !s.trim().is_empty()) {
            command = command.with_region(region.trim());
        }
        command
    }
}

/// 出站回复
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReplyDto {
    pub response: String,
    /// positive / negative / neutral
    pub sentiment: String,
    /// 保留两位小数
    pub confidence: f32,
}

impl From<&Reply> for ChatReplyDto {
    fn from(reply: &Reply) -> Self {
        let sentiment = reply.sentiment();
        Self {
            response: reply.text().to_string(),
            sentiment: sentiment.label().as_str().to_string(),
            confidence: sentiment.rounded_confidence(),
        }
    }
}

/// 情绪趋势数据点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodTrendPoint {
    pub sentiment: String,
    pub confidence: f32,
    /// ISO-8601 时间
    pub timestamp: String,
}

impl From<&MoodLogEntry> for MoodTrendPoint {
    fn from(entry: &MoodLogEntry) -> Self {
        Self {
            sentiment: entry.sentiment().as_str().to_string(),
            confidence: entry.confidence(),
            timestamp: entry.timestamp().to_rfc3339(),
        }
    }
}

/// 对话记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptDto {
    pub message: String,
    pub response: String,
    pub sentiment: String,
    pub timestamp: String,
}

impl From<&TranscriptEntry> for TranscriptDto {
    fn from(entry: &TranscriptEntry) -> Self {
        Self {
            message: entry.message.clone(),
            response: entry.response.clone(),
            sentiment: entry.sentiment.as_str().to_string(),
            timestamp: entry.timestamp.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::support::domain::{SentimentLabel, SentimentResult};

    #[test]
    fn test_reply_dto_shape() {
        let reply = Reply::new(
            "That sounds tough. I'm listening.",
            SentimentResult::new(SentimentLabel::Negative, 0.8567),
        );
        let dto = ChatReplyDto::from(&reply);
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["sentiment"], "negative");
        assert_eq!(json["response"], "That sounds tough. I'm listening.");
        assert!((dto.confidence - 0.86).abs() < 1e-6);
    }

    #[test]
    fn test_chat_request_defaults() {
        let request: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();

        assert_eq!(request.message, "hi");
        assert!(request.language.is_none());
        assert!(request.region.is_none());
    }

    #[test]
    fn test_blank_locale_is_unspecified() {
        let request = ChatRequest {
            message: "hi".to_string(),
            language: Some(" ".to_string()),
            region: Some("US".to_string()),
        };
        let command = request.into_command("alice");

        assert!(command.language.is_none());
        assert_eq!(command.region.as_deref(), Some("US"));
    }
}
