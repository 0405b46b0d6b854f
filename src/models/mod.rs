pub mod attempt;
pub mod bundle;
pub mod grammar_point;
pub mod loaders;
pub mod practice_item;

pub use attempt::{AttemptRecord, AttemptState};
pub use bundle::DataBundle;
pub use grammar_point::{CefrLevel, GrammarPoint};
pub use loaders::{parse_csv_rows, RawRow};
pub use practice_item::{ActivityType, PracticeItem};
