//! 動画フィードスクレイパーライブラリ
//!
//! - YouTubeのビジネスニュースフィードをブラウザで開き、スクロールして動画を読み込む
//! - 動画カードからタイトル・チャンネル・URLを抽出してCSVに保存
//! - CSVの重複行を除去
//!
//! # 使用例
//!
//! ```rust,ignore
//! use video_feed_scraper::{ChromiumLauncher, FeedConfig, FeedPipeline};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = FeedConfig::default().with_output_path("./output/videos.csv");
//!     let pipeline = FeedPipeline::new(ChromiumLauncher::new(), config);
//!
//!     let report = pipeline.run().await.unwrap();
//!     println!("Videos: {}", report.dedup.unique_rows);
//! }
//! ```
//!
//! # tower::Service として使う
//!
//! ```rust,ignore
//! use video_feed_scraper::{FeedService, ScrapeRequest};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = FeedService::new();
//!     let request = ScrapeRequest::default().with_headless(false);
//!
//!     let report = service.call(request).await.unwrap();
//!     println!("CSV saved: {:?}", report.output_path);
//! }
//! ```

pub mod chromium;
pub mod config;
pub mod error;
pub mod feed;
pub mod output;
pub mod pipeline;
pub mod service;
pub mod traits;

#[cfg(test)]
mod testing;

// 主要な型をリエクスポート
pub use chromium::{ChromiumLauncher, ChromiumPage};
pub use config::{FeedConfig, Timings, Viewport, WaitUntil};
pub use error::ScraperError;
pub use feed::{SelectorSet, VideoRecord};
pub use output::DedupReport;
pub use pipeline::{FeedPipeline, PipelineReport};
pub use service::{FeedService, ScrapeRequest};
pub use traits::{BrowserLauncher, PageHandle};
