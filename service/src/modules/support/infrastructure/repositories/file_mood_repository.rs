// 文件持久化情绪日志仓储实现
//
// 每行一条 JSON 记录（JSON Lines），只追加写入；启动时载入内存按用户分组

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::warn;

use crate::modules::support::domain::{MoodLogEntry, UserId};
use crate::modules::support::ports::{newest_first, MoodHistoryStore, RepositoryError};

const MOOD_LOG_FILE_NAME: &str = "mood_logs.jsonl";

/// 文件持久化情绪日志仓储
pub struct FileMoodRepository {
    /// 按用户分组的日志（写入顺序）
    entries: RwLock<HashMap<String, Vec<MoodLogEntry>>>,
    file_path: PathBuf,
}

impl FileMoodRepository {
    /// 创建新的文件仓储
    ///
    /// # Arguments
    /// * `data_dir` - 数据目录路径
    pub async fn new(data_dir: PathBuf) -> Result<Self, RepositoryError> {
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let file_path = data_dir.join(MOOD_LOG_FILE_NAME);
        let mut entries: HashMap<String, Vec<MoodLogEntry>> = HashMap::new();

        if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                let entry: MoodLogEntry = serde_json::from_str(line)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
                entries
                    .entry(entry.user().to_string())
                    .or_default()
                    .push(entry);
            }
        }

        Ok(Self {
            entries: RwLock::new(entries),
            file_path,
        })
    }

    /// 追加一行（调用方需持有写锁，保证追加串行）
    async fn append_line(&self, line: &str) -> Result<(), RepositoryError> {
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
}

#[async_trait]
impl MoodHistoryStore for FileMoodRepository {
    async fn append(&self, entry: MoodLogEntry) -> Result<(), RepositoryError> {
        let mut line = serde_json::to_string(&entry)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        line.push('\n');

        let user_key = entry.user().to_string();
        let mut entries = self.entries.write().await;

        // 写盘成功后才进入内存
        if let Err(e) = self.append_line(&line).await {
            warn!("Failed to persist mood log for {}: {}", user_key, e);
            return Err(e);
        }

        entries.entry(user_key).or_default().push(entry);
        Ok(())
    }

    async fn recent_for(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<MoodLogEntry>, RepositoryError> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(user.as_str())
            .map(|list| newest_first(list, limit))
            .unwrap_or_default())
    }

    async fn count_for(&self, user: &UserId) -> Result<usize, RepositoryError> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(user.as_str())
            .map(|list| list.len())
            .unwrap_or(0))
    }
}
