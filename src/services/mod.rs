pub mod answer_checker;
pub mod catalog;

pub use answer_checker::{check_item_answer, is_correct_answer, normalize_answer};
pub use catalog::{Catalog, Language, PointFilter};
