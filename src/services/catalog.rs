//! 目录查询 - 只读视图
//!
//! 在当前数据快照上按 id 查找语法点与练习题。
//! id 引用可能悬空，查不到时返回 `None` 或直接略过，不会报错。

use crate::models::{AttemptState, CefrLevel, DataBundle, GrammarPoint, PracticeItem};
use crate::parsing::sorter::compare_grammar_points;
use std::collections::HashSet;

/// 展示语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ca,
    Both,
}

/// 语法点筛选条件，空条件表示不过滤
#[derive(Debug, Clone, Default)]
pub struct PointFilter {
    /// 在标题和 id 中搜索（不区分大小写）
    pub search: Option<String>,
    pub thread: Option<String>,
    pub tag: Option<String>,
    pub cefr_levels: Vec<CefrLevel>,
}

impl PointFilter {
    fn matches(&self, point: &GrammarPoint) -> bool {
        let matches_search = match self.search.as_deref().filter(|s| !s.is_empty()) {
            Some(search) => {
                let haystack = format!(
                    "{} {} {}",
                    point.title_en.as_deref().unwrap_or(""),
                    point.title_ca.as_deref().unwrap_or(""),
                    point.point_id
                )
                .to_lowercase();
                haystack.contains(&search.to_lowercase())
            }
            None => true,
        };
        let matches_thread = match self.thread.as_deref().filter(|t| !t.is_empty()) {
            Some(thread) => point.thread_id.as_deref() == Some(thread),
            None => true,
        };
        let matches_tag = match self.tag.as_deref().filter(|t| !t.is_empty()) {
            Some(tag) => point.has_tag(tag),
            None => true,
        };
        let matches_cefr = self.cefr_levels.is_empty()
            || point
                .cefr_level
                .as_ref()
                .map(|level| self.cefr_levels.contains(level))
                .unwrap_or(false);

        matches_search && matches_thread && matches_tag && matches_cefr
    }
}

/// 数据快照上的只读目录
pub struct Catalog<'a> {
    bundle: &'a DataBundle,
}

impl<'a> Catalog<'a> {
    pub fn new(bundle: &'a DataBundle) -> Self {
        Self { bundle }
    }

    pub fn find_point(&self, point_id: &str) -> Option<&'a GrammarPoint> {
        self.bundle
            .grammar_points
            .iter()
            .find(|p| p.point_id == point_id)
    }

    pub fn find_item(&self, item_id: &str) -> Option<&'a PracticeItem> {
        self.bundle
            .practice_items
            .iter()
            .find(|i| i.item_id == item_id)
    }

    pub fn parent_point(&self, point: &GrammarPoint) -> Option<&'a GrammarPoint> {
        point
            .parent_point_id
            .as_deref()
            .and_then(|id| self.find_point(id))
    }

    pub fn next_point(&self, point: &GrammarPoint) -> Option<&'a GrammarPoint> {
        point
            .next_point_id
            .as_deref()
            .and_then(|id| self.find_point(id))
    }

    /// 相关语法点（只包含存在的，按目录顺序）
    pub fn related_points(&self, point: &GrammarPoint) -> Vec<&'a GrammarPoint> {
        let Some(related) = point.related_point_ids.as_ref() else {
            return Vec::new();
        };
        self.bundle
            .grammar_points
            .iter()
            .filter(|p| related.contains(&p.point_id))
            .collect()
    }

    /// 某个语法点下的练习题（按目录顺序）
    pub fn items_for_point(&self, point_id: &str) -> Vec<&'a PracticeItem> {
        self.bundle
            .practice_items
            .iter()
            .filter(|i| i.point_id == point_id)
            .collect()
    }

    /// 按条件筛选语法点，结果按展示顺序排列
    pub fn filter_points(&self, filter: &PointFilter) -> Vec<&'a GrammarPoint> {
        let mut points: Vec<&'a GrammarPoint> = self
            .bundle
            .grammar_points
            .iter()
            .filter(|p| filter.matches(p))
            .collect();
        points.sort_by(|a, b| compare_grammar_points(a, b));
        points
    }

    /// 所有标签（去重，按首次出现顺序）
    pub fn all_tags(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.bundle
            .grammar_points
            .iter()
            .flat_map(|p| p.tags.iter().flatten())
            .map(String::as_str)
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    /// 所有主题线（去重，按首次出现顺序）
    pub fn all_threads(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.bundle
            .grammar_points
            .iter()
            .filter_map(|p| p.thread_id.as_deref())
            .filter(|thread| seen.insert(*thread))
            .collect()
    }

    /// 继续学习：目录中第一道已答对练习题所属的语法点
    pub fn continue_point(&self, attempts: &AttemptState) -> Option<&'a GrammarPoint> {
        self.bundle
            .practice_items
            .iter()
            .find(|item| attempts.get(&item.item_id).map(|r| r.correct).unwrap_or(false))
            .and_then(|item| self.find_point(&item.point_id))
    }
}

/// 语法点标题，按语言逐级回退到 id
pub fn display_title(point: &GrammarPoint, language: Language) -> String {
    let en = point.title_en.as_deref();
    let ca = point.title_ca.as_deref();
    match language {
        Language::En => en.or(ca).unwrap_or(point.point_id.as_str()).to_string(),
        Language::Ca => ca.or(en).unwrap_or(point.point_id.as_str()).to_string(),
        Language::Both => slash_pair(en, ca),
    }
}

/// 语法点讲解
pub fn display_explanation(point: &GrammarPoint, language: Language) -> Option<String> {
    bilingual(
        point.explanation_en.as_deref(),
        point.explanation_ca.as_deref(),
        language,
    )
}

/// 练习题题干
///
/// 双语时与标题相同，固定显示 `英文 / 加泰罗尼亚文`，缺失的一侧留空
pub fn display_prompt(item: &PracticeItem, language: Language) -> Option<String> {
    let en = item.prompt_en.as_deref();
    let ca = item.prompt_ca.as_deref();
    match language {
        Language::Both => Some(slash_pair(en, ca)),
        _ => bilingual(en, ca, language),
    }
}

fn slash_pair(en: Option<&str>, ca: Option<&str>) -> String {
    format!("{} / {}", en.unwrap_or(""), ca.unwrap_or(""))
        .trim()
        .to_string()
}

fn bilingual(en: Option<&str>, ca: Option<&str>, language: Language) -> Option<String> {
    match language {
        Language::En => en.or(ca).map(str::to_string),
        Language::Ca => ca.or(en).map(str::to_string),
        Language::Both => {
            let joined = [en, ca].into_iter().flatten().collect::<Vec<_>>().join(" / ");
            if joined.is_empty() {
                None
            } else {
                Some(joined)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttemptRecord;

    fn point(id: &str) -> GrammarPoint {
        GrammarPoint {
            point_id: id.to_string(),
            ..Default::default()
        }
    }

    fn item(id: &str, point_id: &str) -> PracticeItem {
        PracticeItem {
            item_id: id.to_string(),
            point_id: point_id.to_string(),
            ..Default::default()
        }
    }

    fn bundle() -> DataBundle {
        let p1 = GrammarPoint {
            title_en: Some("Present Simple".to_string()),
            cefr_level: Some(CefrLevel::A1),
            thread_id: Some("verbs".to_string()),
            tags: Some(vec!["verbs".to_string(), "present".to_string()]),
            related_point_ids: Some(vec!["P2".to_string(), "MISSING".to_string()]),
            next_point_id: Some("P2".to_string()),
            parent_point_id: Some("GONE".to_string()),
            ..point("P1")
        };
        let p2 = GrammarPoint {
            title_ca: Some("Passat perifràstic".to_string()),
            cefr_level: Some(CefrLevel::A2),
            thread_id: Some("verbs".to_string()),
            tags: Some(vec!["past".to_string(), "verbs".to_string()]),
            ..point("P2")
        };
        let p3 = GrammarPoint {
            thread_id: Some("articles".to_string()),
            ..point("P3")
        };
        DataBundle::new(
            0,
            vec![p1, p2, p3],
            vec![item("I1", "P1"), item("I2", "P2"), item("I3", "P2"), item("I4", "NOPE")],
        )
    }

    #[test]
    fn test_dangling_references_resolve_to_none() {
        let bundle = bundle();
        let catalog = Catalog::new(&bundle);
        let p1 = catalog.find_point("P1").unwrap();

        assert!(catalog.find_point("MISSING").is_none());
        assert!(catalog.parent_point(p1).is_none());
        assert_eq!(catalog.next_point(p1).unwrap().point_id, "P2");

        let related: Vec<&str> = catalog
            .related_points(p1)
            .iter()
            .map(|p| p.point_id.as_str())
            .collect();
        assert_eq!(related, vec!["P2"]);

        let orphan = catalog.find_item("I4").unwrap();
        assert!(catalog.find_point(&orphan.point_id).is_none());
    }

    #[test]
    fn test_items_for_point() {
        let bundle = bundle();
        let catalog = Catalog::new(&bundle);
        let ids: Vec<&str> = catalog
            .items_for_point("P2")
            .iter()
            .map(|i| i.item_id.as_str())
            .collect();
        assert_eq!(ids, vec!["I2", "I3"]);
        assert!(catalog.items_for_point("P3").is_empty());
    }

    #[test]
    fn test_filter_points() {
        let bundle = bundle();
        let catalog = Catalog::new(&bundle);

        let by_search = catalog.filter_points(&PointFilter {
            search: Some("present".to_string()),
            ..Default::default()
        });
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].point_id, "P1");

        let by_thread = catalog.filter_points(&PointFilter {
            thread: Some("verbs".to_string()),
            ..Default::default()
        });
        assert_eq!(by_thread.len(), 2);

        let by_tag_and_level = catalog.filter_points(&PointFilter {
            tag: Some("verbs".to_string()),
            cefr_levels: vec![CefrLevel::A2],
            ..Default::default()
        });
        assert_eq!(by_tag_and_level.len(), 1);
        assert_eq!(by_tag_and_level[0].point_id, "P2");

        let everything = catalog.filter_points(&PointFilter::default());
        assert_eq!(everything.len(), 3);
    }

    #[test]
    fn test_tags_and_threads_are_distinct_in_first_seen_order() {
        let bundle = bundle();
        let catalog = Catalog::new(&bundle);
        assert_eq!(catalog.all_tags(), vec!["verbs", "present", "past"]);
        assert_eq!(catalog.all_threads(), vec!["verbs", "articles"]);
    }

    #[test]
    fn test_continue_point() {
        let bundle = bundle();
        let catalog = Catalog::new(&bundle);
        let mut attempts = AttemptState::new();
        assert!(catalog.continue_point(&attempts).is_none());

        attempts.insert(
            "I3".to_string(),
            AttemptRecord {
                attempts: 2,
                correct: true,
                last_answer: None,
            },
        );
        assert_eq!(catalog.continue_point(&attempts).unwrap().point_id, "P2");
    }

    #[test]
    fn test_display_title_fallbacks() {
        let bundle = bundle();
        let catalog = Catalog::new(&bundle);
        let p1 = catalog.find_point("P1").unwrap();
        let p2 = catalog.find_point("P2").unwrap();
        let p3 = catalog.find_point("P3").unwrap();

        assert_eq!(display_title(p1, Language::En), "Present Simple");
        assert_eq!(display_title(p1, Language::Ca), "Present Simple");
        assert_eq!(display_title(p2, Language::En), "Passat perifràstic");
        assert_eq!(display_title(p3, Language::En), "P3");
        assert_eq!(display_title(p1, Language::Both), "Present Simple /");
    }

    #[test]
    fn test_display_explanation_both_joins_present_parts() {
        let described = GrammarPoint {
            explanation_en: Some("Habits".to_string()),
            explanation_ca: Some("Hàbits".to_string()),
            ..point("P1")
        };
        assert_eq!(
            display_explanation(&described, Language::Both).as_deref(),
            Some("Habits / Hàbits")
        );
        assert_eq!(
            display_explanation(&described, Language::Ca).as_deref(),
            Some("Hàbits")
        );
        assert_eq!(display_explanation(&point("P9"), Language::Both), None);
    }

    #[test]
    fn test_display_prompt_both_keeps_separator() {
        let english_only = PracticeItem {
            prompt_en: Some("I ___ tea.".to_string()),
            ..item("I1", "P1")
        };
        assert_eq!(
            display_prompt(&english_only, Language::Both).as_deref(),
            Some("I ___ tea. /")
        );
        assert_eq!(
            display_prompt(&english_only, Language::Ca).as_deref(),
            Some("I ___ tea.")
        );

        let catalan_only = PracticeItem {
            prompt_ca: Some("Jo ___ te.".to_string()),
            ..item("I2", "P1")
        };
        assert_eq!(
            display_prompt(&catalan_only, Language::Both).as_deref(),
            Some("/ Jo ___ te.")
        );
    }
}
