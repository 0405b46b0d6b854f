//! 数据导入管线：表格行 → 规范化 → 字段提取 → 记录构建 → 排序

pub mod builders;
pub mod row;
pub mod sorter;

pub use builders::{build_grammar_point, build_practice_item};
pub use row::{extract, normalize_row, parse_json, split_list};
pub use sorter::{sort_grammar_points, sort_practice_items};

use crate::models::{DataBundle, GrammarPoint, PracticeItem, RawRow};
use tracing::{debug, warn};

/// 将两份表格的行构建为排好序的数据快照
///
/// # 参数
/// - `grammar_rows`: 语法点表格的行
/// - `practice_rows`: 练习题表格的行
/// - `fetched_at`: 拉取时间（毫秒时间戳）
pub fn build_bundle(
    grammar_rows: &[RawRow],
    practice_rows: &[RawRow],
    fetched_at: i64,
) -> DataBundle {
    let grammar_points: Vec<GrammarPoint> =
        grammar_rows.iter().filter_map(build_grammar_point).collect();
    let practice_items: Vec<PracticeItem> =
        practice_rows.iter().filter_map(build_practice_item).collect();

    log_dropped("语法点", grammar_rows.len(), grammar_points.len());
    log_dropped("练习题", practice_rows.len(), practice_items.len());

    DataBundle::new(
        fetched_at,
        sort_grammar_points(&grammar_points),
        sort_practice_items(&practice_items),
    )
}

fn log_dropped(kind: &str, total: usize, kept: usize) {
    let dropped = total - kept;
    if dropped > 0 {
        warn!("⚠️ {} 有 {} 行缺少必需的 id，已跳过", kind, dropped);
    } else {
        debug!("{} 全部 {} 行解析成功", kind, total);
    }
}
