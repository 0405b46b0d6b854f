use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单道练习题的答题记录
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub attempts: u32,
    pub correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_answer: Option<String>,
}

/// 练习题 id → 答题记录
pub type AttemptState = BTreeMap<String, AttemptRecord>;
