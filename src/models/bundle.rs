use super::{GrammarPoint, PracticeItem};
use serde::{Deserialize, Serialize};

/// 一次成功拉取得到的完整数据快照
///
/// 只会被整体替换，不会被部分修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBundle {
    /// 拉取时间（毫秒时间戳）
    pub fetched_at: i64,
    pub grammar_points: Vec<GrammarPoint>,
    pub practice_items: Vec<PracticeItem>,
}

impl DataBundle {
    pub fn new(
        fetched_at: i64,
        grammar_points: Vec<GrammarPoint>,
        practice_items: Vec<PracticeItem>,
    ) -> Self {
        Self {
            fetched_at,
            grammar_points,
            practice_items,
        }
    }

    /// 数据的年龄（毫秒），用于判断是否过期
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.fetched_at).max(0)
    }

    pub fn is_stale(&self, now_ms: i64, max_age_ms: i64) -> bool {
        self.age_ms(now_ms) >= max_age_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staleness_is_relative_to_fetch_time() {
        let bundle = DataBundle::new(1_000, Vec::new(), Vec::new());
        assert_eq!(bundle.age_ms(1_500), 500);
        assert!(!bundle.is_stale(1_500, 1_000));
        assert!(bundle.is_stale(2_000, 1_000));
        // 时钟回拨时年龄不为负
        assert_eq!(bundle.age_ms(500), 0);
    }
}
