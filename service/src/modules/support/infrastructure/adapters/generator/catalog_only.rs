use async_trait::async_trait;

use crate::modules::support::ports::{ProviderError, ResponseGenerator};

/// 仅目录模式的生成器
///
/// 始终返回空输出，流水线因此总是使用目录中的预设回复
#[derive(Debug, Clone, Default)]
pub struct CatalogOnlyGenerator;

impl CatalogOnlyGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResponseGenerator for CatalogOnlyGenerator {
    fn name(&self) -> &str {
        "catalog-only"
    }

    async fn generate(&self, _text: &str) -> Result<String, ProviderError> {
        Ok(String::new())
    }
}
