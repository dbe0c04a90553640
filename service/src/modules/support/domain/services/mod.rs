// Support Domain - Services
// 领域服务处理不属于任何实体的业务逻辑

mod escalation_policy;
mod response_catalog;
mod sentiment_lexicon;

pub use escalation_policy::*;
pub use response_catalog::*;
pub use sentiment_lexicon::*;
