// Modules Layer - 业务模块
//
// 按照六边形架构组织的业务模块：
// - support: 情绪支持对话模块，处理消息、危机升级和情绪记录
// - config: 配置模块，处理服务设置

pub mod config;
pub mod support;

pub use config::ConfigService;
pub use support::SupportModule;
