use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::modules::support::domain::{MoodLogEntry, UserId};
use crate::modules::support::ports::{newest_first, MoodHistoryStore, RepositoryError};

/// 内存情绪日志仓储
///
/// 用于开发和测试
pub struct InMemoryMoodRepository {
    /// 日志存储（按用户分组，按写入顺序排列）
    entries: RwLock<HashMap<UserId, Vec<MoodLogEntry>>>,
}

impl InMemoryMoodRepository {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryMoodRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MoodHistoryStore for InMemoryMoodRepository {
    async fn append(&self, entry: MoodLogEntry) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.entry(entry.user().clone()).or_default().push(entry);
        Ok(())
    }

    async fn recent_for(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<MoodLogEntry>, RepositoryError> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(user)
            .map(|list| newest_first(list, limit))
            .unwrap_or_default())
    }

    async fn count_for(&self, user: &UserId) -> Result<usize, RepositoryError> {
        let entries = self.entries.read().await;

        Ok(entries.get(user).map(|list| list.len()).unwrap_or(0))
    }
}
