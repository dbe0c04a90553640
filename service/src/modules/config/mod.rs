// Config Module
//
// 配置管理模块，采用六边形架构
//
// 层次结构:
// - domain: 领域层，包含配置实体
// - ports: 端口层，定义配置读写的抽象接口
// - infrastructure: 基础设施层，实现具体的配置存储适配器
// - application: 应用层，实现 CQRS 命令和查询处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型

// Domain
pub use domain::{
    AppConfig, GeneralConfig, PartialAppConfig, PartialGeneralConfig, PartialPipelineConfig,
    PipelineConfig, ProvidersConfig, MAX_TREND_LIMIT,
};

// Ports
pub use ports::{ConfigError, ConfigRepository};

// Infrastructure
pub use infrastructure::{FileConfigRepository, InMemoryConfigRepository};

// Application
pub use application::ConfigService;
