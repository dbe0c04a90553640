use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::modules::support::domain::{TranscriptEntry, UserId};
use crate::modules::support::ports::{RepositoryError, TranscriptRepository};

/// 内存对话记录仓储
pub struct InMemoryTranscriptRepository {
    entries: RwLock<HashMap<UserId, Vec<TranscriptEntry>>>,
}

impl InMemoryTranscriptRepository {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTranscriptRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptRepository for InMemoryTranscriptRepository {
    async fn append(&self, entry: TranscriptEntry) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.entry(entry.user.clone()).or_default().push(entry);
        Ok(())
    }

    async fn recent_for(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<TranscriptEntry>, RepositoryError> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(user)
            .map(|list| list.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
