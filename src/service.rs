use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::chromium::ChromiumLauncher;
use crate::config::{FeedConfig, DEFAULT_OUTPUT_PATH, DEFAULT_TARGET_URL};
use crate::error::ScraperError;
use crate::pipeline::{FeedPipeline, PipelineReport};
use crate::traits::BrowserLauncher;

/// スクレイピングリクエスト
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub target_url: String,
    pub output_path: PathBuf,
    pub headless: bool,
}

impl Default for ScrapeRequest {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            headless: true,
        }
    }
}

impl ScrapeRequest {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            ..Default::default()
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// ベース設定にリクエスト内容を反映
    pub fn apply(self, base: FeedConfig) -> FeedConfig {
        FeedConfig {
            target_url: self.target_url,
            output_path: self.output_path,
            headless: self.headless,
            ..base
        }
    }
}

impl From<ScrapeRequest> for FeedConfig {
    fn from(req: ScrapeRequest) -> Self {
        req.apply(FeedConfig::default())
    }
}

/// tower::Serviceを実装したフィードスクレイパーサービス
pub struct FeedService<L = ChromiumLauncher> {
    launcher: Arc<L>,
    base_config: FeedConfig,
}

impl<L> Clone for FeedService<L> {
    fn clone(&self) -> Self {
        Self {
            launcher: Arc::clone(&self.launcher),
            base_config: self.base_config.clone(),
        }
    }
}

impl FeedService<ChromiumLauncher> {
    pub fn new() -> Self {
        Self::with_launcher(ChromiumLauncher::new(), FeedConfig::default())
    }
}

impl Default for FeedService<ChromiumLauncher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: BrowserLauncher> FeedService<L> {
    /// リクエストにない設定（タイミング・セレクタなど）は `base_config` を使う
    pub fn with_launcher(launcher: L, base_config: FeedConfig) -> Self {
        Self {
            launcher: Arc::new(launcher),
            base_config,
        }
    }
}

impl<L: BrowserLauncher + 'static> Service<ScrapeRequest> for FeedService<L> {
    type Response = PipelineReport;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!("スクレイピングリクエスト受信: url={}", req.target_url);

        let config = req.apply(self.base_config.clone());
        let pipeline = FeedPipeline::new(self.launcher.clone(), config);

        Box::pin(async move {
            let report = pipeline.run().await?;

            info!(
                "スクレイピング完了: path={:?}, rows={}",
                report.output_path, report.dedup.unique_rows
            );

            Ok(report)
        })
    }
}
