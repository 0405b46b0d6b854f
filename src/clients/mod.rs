pub mod sheet_client;

pub use sheet_client::{with_cache_buster, SheetClient, SheetSource};
