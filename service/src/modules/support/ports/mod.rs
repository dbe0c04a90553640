// Support Ports Layer
// 端口定义了模块与外部世界的接口

mod mood_repository;
mod provider_port;
mod random_source;
mod transcript_repository;
mod translator_port;

pub use mood_repository::*;
pub use provider_port::*;
pub use random_source::*;
pub use transcript_repository::*;
pub use translator_port::*;
