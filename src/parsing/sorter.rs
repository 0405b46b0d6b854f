//! 展示顺序
//!
//! 排序使用稳定排序，相等元素保持输入顺序；函数返回新的序列，不修改输入。

use crate::models::{GrammarPoint, PracticeItem};
use std::cmp::Ordering;

/// 缺失或无法解析的排序值视为最大值
const MISSING_ORDER: f64 = f64::MAX;

fn order_key(sort_order: Option<f64>) -> f64 {
    sort_order.filter(|v| v.is_finite()).unwrap_or(MISSING_ORDER)
}

/// 语法点比较：先按 CEFR 等级，再按 `sort_order`
pub fn compare_grammar_points(a: &GrammarPoint, b: &GrammarPoint) -> Ordering {
    a.cefr_rank()
        .cmp(&b.cefr_rank())
        .then_with(|| order_key(a.sort_order).total_cmp(&order_key(b.sort_order)))
}

/// 练习题比较：只按 `sort_order`
pub fn compare_practice_items(a: &PracticeItem, b: &PracticeItem) -> Ordering {
    order_key(a.sort_order).total_cmp(&order_key(b.sort_order))
}

pub fn sort_grammar_points(points: &[GrammarPoint]) -> Vec<GrammarPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by(compare_grammar_points);
    sorted
}

pub fn sort_practice_items(items: &[PracticeItem]) -> Vec<PracticeItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(compare_practice_items);
    sorted
}
