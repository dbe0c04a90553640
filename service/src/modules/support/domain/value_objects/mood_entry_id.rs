use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 情绪日志条目标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodEntryId(Uuid);

impl MoodEntryId {
    /// 生成新的条目 ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 从字符串解析
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MoodEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MoodEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for MoodEntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = MoodEntryId::parse(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }
}
