//! 行规范化与字段提取
//!
//! 表格的表头在多次编辑后大小写、空白都可能变化，
//! 所以任何按键查找之前都要先经过 [`normalize_row`]。

use crate::models::RawRow;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::warn;

/// 表头已规范化（去空白 + 小写）的行
pub type NormalizedRow = HashMap<String, String>;

/// 规范化一行的表头，单元格内容保持不变
///
/// 多个表头规范化后相同时，按列顺序以最后一列为准。
pub fn normalize_row(raw: &RawRow) -> NormalizedRow {
    raw.iter()
        .map(|(key, value)| (key.trim().to_lowercase(), value.clone()))
        .collect()
}

/// 按候选键顺序取第一个存在的值
///
/// 只看键是否存在：显式的空字符串同样会结束查找。
pub fn extract<'a>(row: &'a NormalizedRow, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|key| row.get(*key))
        .map(String::as_str)
}

/// 按候选键顺序取第一个非空的值
pub fn extract_non_empty<'a>(row: &'a NormalizedRow, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|key| row.get(*key))
        .map(String::as_str)
        .find(|value| !value.is_empty())
}

/// 取单个列的非空值
pub fn text(row: &NormalizedRow, key: &str) -> Option<String> {
    row.get(key).filter(|v| !v.is_empty()).cloned()
}

/// 按逗号或分号拆分列表
///
/// 结果为空时返回 `None`，以区分"没有数据"和"空列表"。
pub fn split_list(value: Option<&str>) -> Option<Vec<String>> {
    split_on(value?, &[',', ';'])
}

/// 按换行、回车或分号拆分例句
pub fn split_examples(value: Option<&str>) -> Option<Vec<String>> {
    split_on(value?, &['\n', '\r', ';'])
}

fn split_on(value: &str, separators: &[char]) -> Option<Vec<String>> {
    let parts: Vec<String> = value
        .split(separators)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}

/// 宽松地解析嵌入的 JSON
///
/// 解析失败只记录警告并返回 `None`，不影响整行的解析。
pub fn parse_json<T: DeserializeOwned>(value: Option<&str>) -> Option<T> {
    let value = value.filter(|v| !v.is_empty())?;
    match serde_json::from_str(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("⚠️ JSON 解析失败，继续处理: {}", e);
            None
        }
    }
}

/// 将排序值转换为数字，无法解析时返回 `None`（排序时排在最后）
pub fn parse_sort_order(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn row(pairs: &[(&str, &str)]) -> NormalizedRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_normalize_row_lowercases_and_trims_keys_only() {
        let raw: RawRow = [(" Title_EN ".to_string(), "  Present Simple ".to_string())]
            .into_iter()
            .collect();
        let normalized = normalize_row(&raw);
        assert_eq!(normalized["title_en"], "  Present Simple ");
    }

    #[test]
    fn test_colliding_headers_keep_last_column() {
        for _ in 0..50 {
            let raw: RawRow = vec![
                ("ID".to_string(), "upper".to_string()),
                ("id ".to_string(), "lower".to_string()),
            ];
            assert_eq!(normalize_row(&raw)["id"], "lower");
        }

        let raw: RawRow = vec![
            ("title".to_string(), "first".to_string()),
            ("Title".to_string(), "second".to_string()),
        ];
        assert_eq!(normalize_row(&raw)["title"], "second");
    }

    #[test]
    fn test_normalize_empty_row() {
        assert!(normalize_row(&RawRow::new()).is_empty());
    }

    #[test]
    fn test_extract_stops_at_present_empty_value() {
        let r = row(&[("point_id", ""), ("id", "P1")]);
        assert_eq!(extract(&r, &["point_id", "id"]), Some(""));
        assert_eq!(extract_non_empty(&r, &["point_id", "id"]), Some("P1"));
        assert_eq!(extract(&r, &["point"]), None);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(Some("a, b;; c")),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(split_list(Some("")), None);
        assert_eq!(split_list(Some(" ; , ")), None);
        assert_eq!(split_list(None), None);
    }

    #[test]
    fn test_split_examples_keeps_commas() {
        assert_eq!(
            split_examples(Some("Yes, I do.\r\nNo, I don't.;  ")),
            Some(vec!["Yes, I do.".to_string(), "No, I don't.".to_string()])
        );
    }

    #[test]
    fn test_parse_json() {
        let parsed: Option<BTreeMap<String, i64>> = parse_json(Some(r#"{"a":1}"#));
        assert_eq!(parsed.unwrap()["a"], 1);

        let broken: Option<BTreeMap<String, i64>> = parse_json(Some("{bad"));
        assert!(broken.is_none());

        let empty: Option<String> = parse_json(Some(""));
        assert!(empty.is_none());
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!(parse_sort_order(Some(" 3 ")), Some(3.0));
        assert_eq!(parse_sort_order(Some("2.5")), Some(2.5));
        assert_eq!(parse_sort_order(Some("third")), None);
        assert_eq!(parse_sort_order(Some("NaN")), None);
        assert_eq!(parse_sort_order(Some("")), None);
        assert_eq!(parse_sort_order(None), None);
    }
}
