pub mod logging;

pub use logging::{format_timestamp, truncate_text};
