// 文件持久化对话记录仓储
//
// 每行一条 JSON 记录（JSON Lines），只追加写入

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::modules::support::domain::{TranscriptEntry, UserId};
use crate::modules::support::ports::{RepositoryError, TranscriptRepository};

const TRANSCRIPT_FILE_NAME: &str = "chat_history.jsonl";

/// 文件对话记录仓储
pub struct FileTranscriptRepository {
    file_path: PathBuf,
    /// 串行化写入
    write_lock: Mutex<()>,
}

impl FileTranscriptRepository {
    pub async fn new(data_dir: PathBuf) -> Result<Self, RepositoryError> {
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Self {
            file_path: data_dir.join(TRANSCRIPT_FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl TranscriptRepository for FileTranscriptRepository {
    async fn append(&self, entry: TranscriptEntry) -> Result<(), RepositoryError> {
        let mut line = serde_json::to_string(&entry)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn recent_for(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<TranscriptEntry>, RepositoryError> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let mut entries = Vec::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let entry: TranscriptEntry = serde_json::from_str(line)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
            if &entry.user == user {
                entries.push(entry);
            }
        }

        Ok(entries.into_iter().rev().take(limit).collect())
    }
}
