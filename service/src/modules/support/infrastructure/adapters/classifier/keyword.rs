use async_trait::async_trait;

use crate::modules::support::domain::{SentimentLexicon, SentimentResult};
use crate::modules::support::ports::{ProviderError, SentimentClassifier};

/// 关键词情绪分类器
///
/// 本地实现，未配置远程模型时使用
#[derive(Debug, Clone, Default)]
pub struct KeywordSentimentClassifier {
    lexicon: SentimentLexicon,
}

impl KeywordSentimentClassifier {
    pub fn new() -> Self {
        Self {
            lexicon: SentimentLexicon::new(),
        }
    }
}

#[async_trait]
impl SentimentClassifier for KeywordSentimentClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn classify(&self, text: &str) -> Result<SentimentResult, ProviderError> {
        Ok(self.lexicon.analyze(text))
    }
}
