//! CSV出力モジュール

mod dedup;
mod writer;

pub use dedup::{dedupe_csv_file, dedupe_lines, DedupReport};
pub use writer::{parse_csv, to_csv_string, write_csv, CSV_HEADER};
