pub mod csv_loader;

pub use csv_loader::{parse_csv_rows, RawRow};
