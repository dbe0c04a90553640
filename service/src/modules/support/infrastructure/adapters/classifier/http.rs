// HTTP Sentiment Classifier
//
// 调用 Hugging Face Inference 风格的文本分类接口：
// POST {base_url}/models/{model}  body: {"inputs": "..."}
// 响应为 [{label, score}, ...] 或 [[{label, score}, ...]]

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::modules::support::domain::SentimentResult;
use crate::modules::support::ports::{ProviderEndpoint, ProviderError, SentimentClassifier};

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassifyResponse {
    /// 取得分最高的标签
    fn best(self) -> Option<LabelScore> {
        let candidates = match self {
            ClassifyResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassifyResponse::Flat(list) => list,
        };

        candidates
            .into_iter()
            .filter(|c| !c.score.is_nan())
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// 远程情绪分类器
pub struct HttpSentimentClassifier {
    endpoint: ProviderEndpoint,
    client: Client,
}

impl HttpSentimentClassifier {
    pub fn new(endpoint: ProviderEndpoint) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    fn name(&self) -> &str {
        "http"
    }

    async fn classify(&self, text: &str) -> Result<SentimentResult, ProviderError> {
        let url = self.endpoint.url(&format!("models/{}", self.endpoint.model));
        debug!("Classifying sentiment via {}", url);

        let mut request = self.client.post(&url).json(&ClassifyRequest { inputs: text });
        if !self.endpoint.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.endpoint.api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.endpoint.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Sentiment API error: {} - {}", status, error_text);
            return Err(ProviderError::ApiError {
                code: status.as_str().to_string(),
                message: error_text,
            });
        }

        let body: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let best = body
            .best()
            .ok_or_else(|| ProviderError::InvalidResponse("No labels in response".to_string()))?;

        Ok(SentimentResult::new(
            self.endpoint.sentiment_label(&best.label),
            best.score,
        ))
    }
}
