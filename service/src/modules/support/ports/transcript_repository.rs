use async_trait::async_trait;

use super::super::domain::{TranscriptEntry, UserId};
use super::mood_repository::RepositoryError;

/// 对话记录仓储端口
#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    /// 追加一条对话记录
    async fn append(&self, entry: TranscriptEntry) -> Result<(), RepositoryError>;

    /// 获取用户最近的对话（最新在前）
    async fn recent_for(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<TranscriptEntry>, RepositoryError>;
}
