//! 答案判定
//!
//! 只判断对错，反馈文案由展示层负责。

use crate::models::PracticeItem;

/// 规范化答案：统一撇号、去掉首尾空白、转小写
pub fn normalize_answer(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'")
        .trim()
        .to_lowercase()
}

/// 判断作答是否与任一可接受答案一致
///
/// 没有可接受答案时一律判错
pub fn is_correct_answer(input: &str, expected: &[String]) -> bool {
    if expected.is_empty() {
        return false;
    }
    let normalized = normalize_answer(input);
    expected
        .iter()
        .any(|answer| normalize_answer(answer) == normalized)
}

/// 获取一道题的可接受答案
///
/// 优先使用 `acceptable_answers`，否则把英文题干按 `;` 或 `|` 拆分
pub fn expected_answers(item: &PracticeItem) -> Vec<String> {
    if let Some(answers) = item.acceptable_answers.as_ref().filter(|a| !a.is_empty()) {
        return answers.clone();
    }

    item.prompt_en
        .as_deref()
        .map(|prompt| {
            prompt
                .split([';', '|'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 判定一道题的作答
pub fn check_item_answer(item: &PracticeItem, input: &str) -> bool {
    is_correct_answer(input, &expected_answers(item))
}
