//! フィードページの読み込みとスクロール

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use crate::error::ScraperError;
use crate::traits::{BrowserLauncher, PageHandle};

use super::extractor::extract_videos;
use super::types::VideoRecord;

/// 1回あたりビューポート2画面分スクロール
pub const SCROLL_SCRIPT: &str = "window.scrollBy(0, window.innerHeight * 2)";

/// ブラウザを起動してページを読み込み、動画一覧を抽出する
///
/// ページは成功・失敗どちらの場合も閉じてから返る。
pub async fn load_and_extract(
    launcher: &dyn BrowserLauncher,
    config: &FeedConfig,
) -> Result<Vec<VideoRecord>, ScraperError> {
    info!("Launching browser...");
    let mut page = launcher.launch(config).await?;

    let result = async {
        load_page(page.as_mut(), config).await?;
        extract_videos(page.as_mut(), &config.selectors).await
    }
    .await;

    info!("Closing browser...");
    if let Err(e) = page.close().await {
        warn!("Failed to close browser: {}", e);
    }

    if let Err(e) = &result {
        warn!("Page load failed: {}", e);
        if let Some(hint) = e.hint() {
            warn!("{}", hint);
        }
    }

    result
}

/// ナビゲーション → コンテンツ待機 → スクロール
pub async fn load_page(page: &mut dyn PageHandle, config: &FeedConfig) -> Result<(), ScraperError> {
    let timings = &config.timings;

    info!("Navigating to {}", config.target_url);
    page.navigate(
        &config.target_url,
        config.wait_until,
        timings.navigation_timeout,
    )
    .await?;

    let marker = &config.selectors.content_marker;
    match page.wait_for_selector(marker, timings.content_timeout).await {
        Ok(()) => info!("Content marker {} found", marker),
        Err(e @ ScraperError::ContentWaitTimeout { .. }) => {
            // 部分的に描画されている可能性があるので続行
            warn!("{}, proceeding anyway", e);
        }
        Err(e) => return Err(e),
    }

    debug!("Waiting {:?} for rendering", timings.warmup);
    sleep(timings.warmup).await;

    for i in 0..timings.scroll_cycles {
        page.evaluate(SCROLL_SCRIPT).await?;
        debug!("Scrolled ({}/{})", i + 1, timings.scroll_cycles);
        sleep(timings.scroll_pause).await;
    }

    sleep(timings.settle).await;
    info!("Page loaded");
    Ok(())
}
