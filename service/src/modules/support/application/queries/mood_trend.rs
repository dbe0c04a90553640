use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::support::application::{ApplicationError, MoodTrendPoint, QueryHandler};
use crate::modules::support::domain::UserId;
use crate::modules::support::ports::MoodHistoryStore;

/// 情绪趋势默认返回条数
pub const DEFAULT_TREND_LIMIT: usize = 30;

/// 查询某用户最近的情绪记录
#[derive(Debug, Clone)]
pub struct MoodTrendQuery {
    pub user: UserId,
    /// 不指定时使用处理器上限
    pub limit: Option<usize>,
}

impl MoodTrendQuery {
    pub fn new(user: impl Into<UserId>) -> Self {
        Self {
            user: user.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// 情绪趋势查询处理器
pub struct MoodTrendHandler {
    store: Arc<dyn MoodHistoryStore>,
    max_limit: usize,
}

impl MoodTrendHandler {
    pub fn new(store: Arc<dyn MoodHistoryStore>) -> Self {
        Self {
            store,
            max_limit: DEFAULT_TREND_LIMIT,
        }
    }

    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit.max(1);
        self
    }
}

#[async_trait]
impl QueryHandler<MoodTrendQuery, Vec<MoodTrendPoint>> for MoodTrendHandler {
    async fn handle(&self, query: MoodTrendQuery) -> Result<Vec<MoodTrendPoint>, ApplicationError> {
        let limit = match query.limit {
            Some(0) => {
                return Err(ApplicationError::Validation(
                    "limit must be greater than zero".to_string(),
                ))
            }
            Some(limit) => limit.min(self.max_limit),
            None => self.max_limit,
        };

        let entries = self.store.recent_for(&query.user, limit).await?;
        tracing::debug!(
            "[MoodTrend] {} entries for {} (limit {})",
            entries.len(),
            query.user,
            limit
        );

        Ok(entries.iter().map(MoodTrendPoint::from).collect())
    }
}
