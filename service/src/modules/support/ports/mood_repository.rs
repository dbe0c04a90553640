use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::{MoodLogEntry, UserId};

/// 仓储错误类型
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// 情绪日志仓储端口
///
/// 只追加。并发追加由实现内部串行化
#[async_trait]
pub trait MoodHistoryStore: Send + Sync {
    /// 追加一条日志
    async fn append(&self, entry: MoodLogEntry) -> Result<(), RepositoryError>;

    /// 获取用户最近的日志（最新在前，最多 `limit` 条）
    async fn recent_for(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<MoodLogEntry>, RepositoryError>;

    /// 获取用户日志总数
    async fn count_for(&self, user: &UserId) -> Result<usize, RepositoryError>;
}

/// 按时间倒序截取（时间相同的按写入顺序倒序）
pub fn newest_first(entries: &[MoodLogEntry], limit: usize) -> Vec<MoodLogEntry> {
    let mut sorted: Vec<MoodLogEntry> = entries.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    sorted.truncate(limit);
    sorted
}
