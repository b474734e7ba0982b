//! 読み込み → 抽出 → CSV書き出し → 重複除去 の一括実行

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::FeedConfig;
use crate::error::ScraperError;
use crate::feed::load_and_extract;
use crate::output::{dedupe_csv_file, write_csv, DedupReport};
use crate::traits::BrowserLauncher;

/// 実行結果
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub target_url: String,
    pub output_path: PathBuf,
    pub records_extracted: usize,
    pub dedup: DedupReport,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl PipelineReport {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

pub struct FeedPipeline<L> {
    launcher: L,
    config: FeedConfig,
}

impl<L: BrowserLauncher> FeedPipeline<L> {
    pub fn new(launcher: L, config: FeedConfig) -> Self {
        Self { launcher, config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// 各ステップを順に実行し、失敗した時点で中断する
    pub async fn run(&self) -> Result<PipelineReport, ScraperError> {
        let started_at = Utc::now();
        info!("Starting feed scrape: {}", self.config.target_url);

        let videos = load_and_extract(&self.launcher, &self.config).await?;

        write_csv(&self.config.output_path, &videos)?;

        let dedup = dedupe_csv_file(&self.config.output_path)?;

        let report = PipelineReport {
            target_url: self.config.target_url.clone(),
            output_path: self.config.output_path.clone(),
            records_extracted: videos.len(),
            dedup,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            "Scrape complete: {} videos, {} unique rows written to {:?} in {}ms",
            report.records_extracted,
            report.dedup.unique_rows,
            report.output_path,
            report.elapsed().num_milliseconds()
        );

        Ok(report)
    }
}
