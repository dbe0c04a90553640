// Config Domain Layer
//
// 配置领域层，包含配置实体

pub mod entities;

pub use entities::*;
