use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 练习题类型
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    Mcq,
    #[default]
    FillBlank,
    ErrorCorrection,
    TranslateCaEn,
    TranslateEnCa,
    WordOrder,
    Other(String),
}

impl ActivityType {
    /// 从表格中的原始文本解析（精确匹配）
    pub fn parse(s: &str) -> Self {
        match s {
            "MCQ" => ActivityType::Mcq,
            "FILL_BLANK" => ActivityType::FillBlank,
            "ERROR_CORRECTION" => ActivityType::ErrorCorrection,
            "TRANSLATE_CA_EN" => ActivityType::TranslateCaEn,
            "TRANSLATE_EN_CA" => ActivityType::TranslateEnCa,
            "WORD_ORDER" => ActivityType::WordOrder,
            other => ActivityType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::Mcq => "MCQ",
            ActivityType::FillBlank => "FILL_BLANK",
            ActivityType::ErrorCorrection => "ERROR_CORRECTION",
            ActivityType::TranslateCaEn => "TRANSLATE_CA_EN",
            ActivityType::TranslateEnCa => "TRANSLATE_EN_CA",
            ActivityType::WordOrder => "WORD_ORDER",
            ActivityType::Other(s) => s,
        }
    }
}

impl From<String> for ActivityType {
    fn from(s: String) -> Self {
        ActivityType::parse(&s)
    }
}

impl From<ActivityType> for String {
    fn from(kind: ActivityType) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 练习题
///
/// `point_id` 指向所属语法点，该语法点不一定存在。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PracticeItem {
    pub item_id: String,
    pub point_id: String,
    #[serde(default)]
    pub activity_type: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_answers: Option<Vec<String>>,
    /// 选项字母 → 选项文本，按字母排序
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
