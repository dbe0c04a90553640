use super::super::value_objects::SentimentResult;
use super::resource::Resource;

/// 回复实体
///
/// 由流水线逐步构建；返回给调用方时 `text` 一定非空
#[derive(Debug, Clone)]
pub struct Reply {
    text: String,
    sentiment: SentimentResult,
    escalation: Option<Resource>,
}

impl Reply {
    pub fn new(text: impl Into<String>, sentiment: SentimentResult) -> Self {
        Self {
            text: text.into(),
            sentiment,
            escalation: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentiment(&self) -> SentimentResult {
        self.sentiment
    }

    pub fn escalation(&self) -> Option<&Resource> {
        self.escalation.as_ref()
    }

    /// 附加求助资源（同时把链接追加到文本末尾）
    pub fn escalate(&mut self, resource: Resource) {
        self.text.push_str(&resource.to_suffix());
        self.escalation = Some(resource);
    }

    /// 替换文本（用于回译）
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::support::domain::value_objects::{RegionCode, SentimentLabel};

    #[test]
    fn test_escalate_appends_suffix() {
        let mut reply = Reply::new(
            "I'm here for you.",
            SentimentResult::new(SentimentLabel::Negative, 0.9),
        );
        reply.escalate(Resource::new(
            "BetterHelp",
            "https://www.betterhelp.com",
            RegionCode::global(),
        ));

        assert!(reply.text().starts_with("I'm here for you."));
        assert!(reply.text().ends_with("[BetterHelp](https://www.betterhelp.com)"));
        assert_eq!(reply.escalation().map(|r| r.name.as_str()), Some("BetterHelp"));
    }
}
