// Support Infrastructure - Repositories
//
// 仓储实现：
// - InMemory*Repository: 内存仓储，用于开发和测试
// - File*Repository: 文件持久化仓储，用于生产环境

mod file_mood_repository;
mod file_transcript_repository;
mod in_memory_mood_repository;
mod in_memory_transcript_repository;

pub use file_mood_repository::*;
pub use file_transcript_repository::*;
pub use in_memory_mood_repository::*;
pub use in_memory_transcript_repository::*;
