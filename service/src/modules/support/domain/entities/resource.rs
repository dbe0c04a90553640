use serde::{Deserialize, Serialize};

use super::super::value_objects::RegionCode;

/// 求助资源
///
/// 静态目录条目，进程生命周期内不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub region: RegionCode,
}

impl Resource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, region: RegionCode) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            region,
        }
    }

    /// 是否对指定地区可用
    pub fn is_available_in(&self, region: &RegionCode) -> bool {
        self.region.is_global() || &self.region == region
    }

    /// 追加到回复末尾的 Markdown 链接
    pub fn to_suffix(&self) -> String {
        format!("\n\nResource: [{}]({})", self.name, self.url)
    }
}
