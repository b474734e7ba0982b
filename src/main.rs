use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use video_feed_scraper::{ChromiumLauncher, FeedConfig, FeedPipeline};

#[tokio::main]
async fn main() -> ExitCode {
    // ログ設定（RUST_LOG で上書き可能）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,video_feed_scraper=debug")),
        )
        .init();

    let config = FeedConfig::from_env();
    let pipeline = FeedPipeline::new(ChromiumLauncher::new(), config);

    match pipeline.run().await {
        Ok(report) => {
            info!(
                "Saved {} videos to {:?}",
                report.dedup.unique_rows, report.output_path
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scrape failed: {}", e);
            if let Some(hint) = e.hint() {
                error!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
