// Config Infrastructure Layer
//
// 配置存储的具体实现

pub mod file_repository;
pub mod memory_repository;

pub use file_repository::FileConfigRepository;
pub use memory_repository::InMemoryConfigRepository;
