use super::super::value_objects::{SentimentLabel, SentimentResult};

const POSITIVE_WORDS: &[&str] = &[
    "great", "good", "happy", "glad", "love", "awesome", "wonderful", "amazing", "excited",
    "fantastic", "better", "thanks", "grateful", "calm", "proud", "joy",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "bad", "terrible", "awful", "depressed", "anxious", "lonely", "hopeless", "tired",
    "angry", "hate", "scared", "afraid", "hurt", "worthless", "stressed", "cry", "crying",
];

/// 强烈的危机信号，单独出现也按高置信度消极处理
const CRISIS_PHRASES: &[&str] = &[
    "give up",
    "end it",
    "kill myself",
    "can't go on",
    "no reason to live",
    "want to die",
    "hurt myself",
];

/// 情绪词典
///
/// 领域服务：基于关键词的情绪判断（未配置远程分类器时使用）
#[derive(Debug, Clone, Default)]
pub struct SentimentLexicon;

impl SentimentLexicon {
    pub fn new() -> Self {
        Self
    }

    /// 分析文本情绪
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let text_lower = text.to_lowercase();

        if CRISIS_PHRASES.iter().any(|p| text_lower.contains(p)) {
            return SentimentResult::new(SentimentLabel::Negative, 0.95);
        }

        let words: Vec<&str> = text_lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();

        let positive = words.iter().filter(|w| POSITIVE_WORDS.contains(*w)).count();
        let negative = words.iter().filter(|w| NEGATIVE_WORDS.contains(*w)).count();

        if positive == negative {
            return SentimentResult::new(SentimentLabel::Neutral, if positive == 0 { 0.5 } else { 0.4 });
        }

        let (label, hits, other) = if positive > negative {
            (SentimentLabel::Positive, positive, negative)
        } else {
            (SentimentLabel::Negative, negative, positive)
        };

        // 命中越多、反向词越少，置信度越高
        let margin = (hits - other) as f32;
        let confidence = 0.6 + 0.1 * margin.min(3.0);
        SentimentResult::new(label, confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let result = SentimentLexicon::new().analyze("I feel great today");
        assert_eq!(result.label(), SentimentLabel::Positive);
    }

    #[test]
    fn test_crisis_phrase() {
        let result = SentimentLexicon::new().analyze("I want to give up");
        assert_eq!(result.label(), SentimentLabel::Negative);
        assert!(result.confidence() > 0.7);
    }

    #[test]
    fn test_neutral_text() {
        let result = SentimentLexicon::new().analyze("I went to the store");
        assert_eq!(result.label(), SentimentLabel::Neutral);
    }
}
