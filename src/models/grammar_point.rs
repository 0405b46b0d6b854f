use serde::{Deserialize, Serialize};

/// CEFR 等级
///
/// 六个标准等级之外的取值原样保留在 `Other` 中，排序时排在所有标准等级之后。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    Other(String),
}

impl CefrLevel {
    /// 未知等级的排序值
    pub const UNRANKED: u8 = 99;

    /// 所有标准等级，按从低到高排列
    pub const STANDARD: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    /// 从表格中的原始文本解析（精确匹配）
    pub fn parse(s: &str) -> Self {
        match s {
            "A1" => CefrLevel::A1,
            "A2" => CefrLevel::A2,
            "B1" => CefrLevel::B1,
            "B2" => CefrLevel::B2,
            "C1" => CefrLevel::C1,
            "C2" => CefrLevel::C2,
            other => CefrLevel::Other(other.to_string()),
        }
    }

    /// 获取排序值（A1=1 … C2=6，其他为 99）
    pub fn rank(&self) -> u8 {
        match self {
            CefrLevel::A1 => 1,
            CefrLevel::A2 => 2,
            CefrLevel::B1 => 3,
            CefrLevel::B2 => 4,
            CefrLevel::C1 => 5,
            CefrLevel::C2 => 6,
            CefrLevel::Other(_) => Self::UNRANKED,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
            CefrLevel::Other(s) => s,
        }
    }
}

impl From<String> for CefrLevel {
    fn from(s: String) -> Self {
        CefrLevel::parse(&s)
    }
}

impl From<CefrLevel> for String {
    fn from(level: CefrLevel) -> Self {
        level.as_str().to_string()
    }
}

impl std::fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 语法点
///
/// `parent_point_id` / `next_point_id` / `related_point_ids` 只是按 id 的弱引用，
/// 可能指向不存在的语法点，读取时通过 [`crate::services::Catalog`] 查找。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrammarPoint {
    pub point_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cefr_level: Option<CefrLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation_ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_errors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples_en: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples_ca: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_point_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_point_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_point_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl GrammarPoint {
    /// CEFR 排序值，缺失时为 99
    pub fn cefr_rank(&self) -> u8 {
        self.cefr_level
            .as_ref()
            .map(CefrLevel::rank)
            .unwrap_or(CefrLevel::UNRANKED)
    }

    /// 是否带有指定标签
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .map(|tags| tags.iter().any(|t| t == tag))
            .unwrap_or(false)
    }
}
