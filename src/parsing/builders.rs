//! 记录构建：规范化后的行 → 语法点 / 练习题
//!
//! 构建函数从不返回错误。缺少必需 id 的行直接丢弃，
//! 格式不完整的表格行不能阻塞其余行的导入。

use super::row::{
    extract, extract_non_empty, normalize_row, parse_json, parse_sort_order, split_examples,
    split_list, text, NormalizedRow,
};
use crate::models::{ActivityType, CefrLevel, GrammarPoint, PracticeItem, RawRow};
use std::collections::BTreeMap;
use tracing::debug;

/// 每个逻辑字段可接受的表头别名，按优先级排列
pub mod aliases {
    pub const POINT_ID: &[&str] = &["point_id", "id", "point"];
    pub const GRAMMAR_TITLE_EN: &[&str] = &["title_en", "title", "point"];
    pub const EXPLANATION_EN: &[&str] = &["explanation_en", "explanation"];
    pub const FORM_PATTERN: &[&str] = &["form_pattern", "pattern"];
    pub const COMMON_ERRORS: &[&str] = &["common_errors", "errors"];
    pub const EXAMPLES_EN: &[&str] = &["examples_en", "examples", "example_en"];
    pub const EXAMPLES_CA: &[&str] = &["examples_ca", "example_ca"];
    pub const RELATED_POINT_IDS: &[&str] = &["related_point_ids", "related"];

    pub const ITEM_ID: &[&str] = &["item_id", "id"];
    pub const ITEM_POINT_ID: &[&str] = &["point_id", "point"];
    pub const PROMPT_EN: &[&str] = &["prompt_en", "prompt"];
    pub const ACCEPTABLE_ANSWERS: &[&str] = &["acceptable_answers", "answers"];

    /// 选项字母 → 选项列
    pub const OPTION_COLUMNS: &[(&str, &str)] = &[
        ("a", "option_a"),
        ("b", "option_b"),
        ("c", "option_c"),
        ("d", "option_d"),
    ];
}

fn first_text(row: &NormalizedRow, candidates: &[&str]) -> Option<String> {
    extract_non_empty(row, candidates).map(str::to_string)
}

/// 从表格行构建语法点
///
/// # 返回
/// 缺少 `point_id`（或别名 `id` / `point`）时返回 `None`
pub fn build_grammar_point(raw: &RawRow) -> Option<GrammarPoint> {
    let row = normalize_row(raw);

    let Some(point_id) = first_text(&row, aliases::POINT_ID) else {
        debug!("跳过缺少 point_id 的语法点行");
        return None;
    };

    Some(GrammarPoint {
        point_id,
        title_en: first_text(&row, aliases::GRAMMAR_TITLE_EN),
        title_ca: text(&row, "title_ca"),
        cefr_level: text(&row, "cefr_level").map(CefrLevel::from),
        sort_order: parse_sort_order(row.get("sort_order").map(String::as_str)),
        thread_id: text(&row, "thread_id"),
        tags: split_list(row.get("tags").map(String::as_str)),
        explanation_en: first_text(&row, aliases::EXPLANATION_EN),
        explanation_ca: text(&row, "explanation_ca"),
        form_pattern: first_text(&row, aliases::FORM_PATTERN),
        common_errors: first_text(&row, aliases::COMMON_ERRORS),
        examples_en: split_examples(extract(&row, aliases::EXAMPLES_EN)),
        examples_ca: split_examples(extract(&row, aliases::EXAMPLES_CA)),
        parent_point_id: text(&row, "parent_point_id"),
        related_point_ids: split_list(extract_non_empty(&row, aliases::RELATED_POINT_IDS)),
        next_point_id: text(&row, "next_point_id"),
        media_image: text(&row, "media_image"),
        media_audio: text(&row, "media_audio"),
        updated_at: text(&row, "updated_at"),
    })
}

/// 从表格行构建练习题
///
/// # 返回
/// `item_id` 与 `point_id` 任一缺失时返回 `None`
pub fn build_practice_item(raw: &RawRow) -> Option<PracticeItem> {
    let row = normalize_row(raw);

    let item_id = first_text(&row, aliases::ITEM_ID);
    let point_id = first_text(&row, aliases::ITEM_POINT_ID);
    let (Some(item_id), Some(point_id)) = (item_id, point_id) else {
        debug!("跳过缺少 item_id 或 point_id 的练习题行");
        return None;
    };

    let feedback = parse_json::<String>(row.get("feedback_json").map(String::as_str))
        .filter(|f| !f.is_empty())
        .or_else(|| text(&row, "feedback"));

    Some(PracticeItem {
        item_id,
        point_id,
        activity_type: text(&row, "activity_type")
            .map(ActivityType::from)
            .unwrap_or_default(),
        prompt_en: first_text(&row, aliases::PROMPT_EN),
        prompt_ca: text(&row, "prompt_ca"),
        acceptable_answers: split_list(extract_non_empty(&row, aliases::ACCEPTABLE_ANSWERS)),
        options: build_options(&row),
        hint: text(&row, "hint"),
        feedback,
        sort_order: parse_sort_order(row.get("sort_order").map(String::as_str)),
        tags: split_list(row.get("tags").map(String::as_str)),
        media_image: text(&row, "media_image"),
        media_audio: text(&row, "media_audio"),
        updated_at: text(&row, "updated_at"),
    })
}

/// 构建选项：优先使用 `options_json`，否则扫描 `option_a`..`option_d`
fn build_options(row: &NormalizedRow) -> Option<BTreeMap<String, String>> {
    if let Some(options) =
        parse_json::<BTreeMap<String, String>>(row.get("options_json").map(String::as_str))
    {
        if !options.is_empty() {
            return Some(options);
        }
    }

    let options: BTreeMap<String, String> = aliases::OPTION_COLUMNS
        .iter()
        .filter_map(|(letter, column)| text(row, column).map(|value| (letter.to_string(), value)))
        .collect();

    if options.is_empty() {
        None
    } else {
        Some(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_grammar_point_requires_id() {
        assert!(build_grammar_point(&raw(&[("title_en", "Orphan")])).is_none());
        assert!(build_grammar_point(&raw(&[("point_id", ""), ("title", "Empty")])).is_none());
    }

    #[test]
    fn test_grammar_point_header_synonyms() {
        let point = build_grammar_point(&raw(&[
            ("ID", "P7"),
            ("Title", "Articles"),
            ("Explanation", "Use el/la"),
            ("Pattern", "el + noun"),
            ("Errors", "la home"),
            ("Related", "P1; P2"),
        ]))
        .unwrap();

        assert_eq!(point.point_id, "P7");
        assert_eq!(point.title_en.as_deref(), Some("Articles"));
        assert_eq!(point.explanation_en.as_deref(), Some("Use el/la"));
        assert_eq!(point.form_pattern.as_deref(), Some("el + noun"));
        assert_eq!(point.common_errors.as_deref(), Some("la home"));
        assert_eq!(
            point.related_point_ids,
            Some(vec!["P1".to_string(), "P2".to_string()])
        );
    }

    #[test]
    fn test_grammar_point_full_row() {
        let point = build_grammar_point(&raw(&[
            ("point_id", "P1"),
            ("title_en", "Present Simple"),
            ("title_ca", "Present d'indicatiu"),
            ("cefr_level", "A1"),
            ("sort_order", "2"),
            ("thread_id", "verbs"),
            ("tags", "verbs, present"),
            ("examples_en", "I eat.\nShe eats."),
            ("examples_ca", "Jo menjo.;Ella menja."),
            ("parent_point_id", "P0"),
            ("next_point_id", "P2"),
            ("updated_at", "2024-01-01"),
        ]))
        .unwrap();

        assert_eq!(point.cefr_level, Some(CefrLevel::A1));
        assert_eq!(point.sort_order, Some(2.0));
        assert_eq!(
            point.tags,
            Some(vec!["verbs".to_string(), "present".to_string()])
        );
        assert_eq!(
            point.examples_en,
            Some(vec!["I eat.".to_string(), "She eats.".to_string()])
        );
        assert_eq!(
            point.examples_ca,
            Some(vec!["Jo menjo.".to_string(), "Ella menja.".to_string()])
        );
        assert_eq!(point.parent_point_id.as_deref(), Some("P0"));
        assert_eq!(point.next_point_id.as_deref(), Some("P2"));
        assert!(point.media_image.is_none());
    }

    #[test]
    fn test_unparseable_sort_order_is_absent() {
        let point =
            build_grammar_point(&raw(&[("point_id", "P1"), ("sort_order", "first")])).unwrap();
        assert_eq!(point.sort_order, None);
    }

    #[test]
    fn test_practice_item_requires_both_ids() {
        assert!(build_practice_item(&raw(&[("item_id", "I1")])).is_none());
        assert!(build_practice_item(&raw(&[("point_id", "P1")])).is_none());
        assert!(build_practice_item(&raw(&[("item_id", ""), ("point_id", "P1")])).is_none());
        assert!(build_practice_item(&raw(&[("item_id", "I1"), ("point", "P1")])).is_some());
    }

    #[test]
    fn test_practice_item_defaults() {
        let item = build_practice_item(&raw(&[("item_id", "I1"), ("point_id", "P1")])).unwrap();
        assert_eq!(item.activity_type, ActivityType::FillBlank);
        assert!(item.options.is_none());
        assert!(item.acceptable_answers.is_none());
        assert!(item.feedback.is_none());
    }

    #[test]
    fn test_options_from_columns_skip_empty() {
        let item = build_practice_item(&raw(&[
            ("item_id", "I1"),
            ("point_id", "P1"),
            ("Activity_Type", "MCQ"),
            ("option_a", "menjo"),
            ("option_b", ""),
            ("option_c", "menja"),
        ]))
        .unwrap();

        assert_eq!(item.activity_type, ActivityType::Mcq);
        let options = item.options.unwrap();
        let letters: Vec<&str> = options.keys().map(String::as_str).collect();
        assert_eq!(letters, vec!["a", "c"]);
        assert_eq!(options["c"], "menja");
    }

    #[test]
    fn test_options_json_preferred_over_columns() {
        let item = build_practice_item(&raw(&[
            ("item_id", "I1"),
            ("point_id", "P1"),
            ("options_json", r#"{"b":"two","a":"one"}"#),
            ("option_a", "ignored"),
        ]))
        .unwrap();

        let options = item.options.unwrap();
        assert_eq!(options["a"], "one");
        assert_eq!(options["b"], "two");
    }

    #[test]
    fn test_malformed_options_json_falls_back_to_columns() {
        let item = build_practice_item(&raw(&[
            ("item_id", "I1"),
            ("point_id", "P1"),
            ("options_json", "{a: one"),
            ("option_a", "one"),
        ]))
        .unwrap();

        assert_eq!(item.options.unwrap()["a"], "one");
    }

    #[test]
    fn test_feedback_json_preferred_then_raw() {
        let with_json = build_practice_item(&raw(&[
            ("item_id", "I1"),
            ("point_id", "P1"),
            ("feedback_json", r#""Well done""#),
            ("feedback", "raw"),
        ]))
        .unwrap();
        assert_eq!(with_json.feedback.as_deref(), Some("Well done"));

        let broken_json = build_practice_item(&raw(&[
            ("item_id", "I1"),
            ("point_id", "P1"),
            ("feedback_json", "not json"),
            ("feedback", "raw"),
        ]))
        .unwrap();
        assert_eq!(broken_json.feedback.as_deref(), Some("raw"));
    }

    #[test]
    fn test_answers_synonym() {
        let item = build_practice_item(&raw(&[
            ("item_id", "I1"),
            ("point_id", "P1"),
            ("answers", "menjo; jo menjo"),
        ]))
        .unwrap();
        assert_eq!(
            item.acceptable_answers,
            Some(vec!["menjo".to_string(), "jo menjo".to_string()])
        );
    }
}
