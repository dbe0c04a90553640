// Support Domain Layer
// 领域层包含业务实体、值对象、领域服务和领域事件

pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;

// 重导出常用类型
pub use entities::{Message, MoodLogEntry, Reply, Resource, TranscriptEntry};
pub use events::*;
pub use services::{
    CatalogConfig, CatalogError, EscalationPolicy, ResponseCatalog, SentimentLexicon,
    DEFAULT_ESCALATION_THRESHOLD,
};
pub use value_objects::{
    LanguageCode, MoodEntryId, RegionCode, SentimentLabel, SentimentResult, UserId,
    DEFAULT_LANGUAGE, GLOBAL_REGION,
};
