// Queries - 查询处理器

mod mood_trend;
mod recent_transcript;

pub use mood_trend::*;
pub use recent_transcript::*;
