//! フィードスクレイパーモジュール
//!
//! フィードページを読み込み、動画カードからタイトル・チャンネル・URLを取り出す

mod extractor;
mod loader;
mod types;

pub use extractor::{extract_videos, extraction_script, parse_payload};
pub use loader::{load_and_extract, load_page, SCROLL_SCRIPT};
pub use types::{SelectorSet, VideoRecord};
