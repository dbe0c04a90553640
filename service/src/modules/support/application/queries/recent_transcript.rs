use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::support::application::{ApplicationError, QueryHandler, TranscriptDto};
use crate::modules::support::domain::UserId;
use crate::modules::support::ports::TranscriptRepository;

/// 查询某用户最近的对话记录
#[derive(Debug, Clone)]
pub struct RecentTranscriptQuery {
    pub user: UserId,
    pub limit: usize,
}

pub struct RecentTranscriptHandler {
    store: Arc<dyn TranscriptRepository>,
}

impl RecentTranscriptHandler {
    pub fn new(store: Arc<dyn TranscriptRepository>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QueryHandler<RecentTranscriptQuery, Vec<TranscriptDto>> for RecentTranscriptHandler {
    async fn handle(
        &self,
        query: RecentTranscriptQuery,
    ) -> Result<Vec<TranscriptDto>, ApplicationError> {
        let records = self.store.recent_for(&query.user, query.limit).await?;
        Ok(records.iter().map(TranscriptDto::from).collect())
    }
}
