//! chromiumoxide によるブラウザ操作の実装

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::handler::viewport::Viewport as CdpViewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::config::{FeedConfig, WaitUntil};
use crate::error::ScraperError;
use crate::traits::{BrowserLauncher, PageHandle};

/// セレクタ出現チェックのインターバル
const SELECTOR_POLL_INTERVAL_MS: u64 = 250;
/// DOM構築完了チェックのインターバル
const READY_STATE_POLL_INTERVAL_MS: u64 = 100;

/// Chromiumを起動するランチャー
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher;

impl ChromiumLauncher {
    pub fn new() -> Self {
        Self
    }

    fn browser_config(config: &FeedConfig) -> Result<BrowserConfig, ScraperError> {
        let viewport = CdpViewport {
            width: config.viewport.width,
            height: config.viewport.height,
            ..Default::default()
        };

        let mut builder = BrowserConfig::builder()
            .window_size(config.viewport.width, config.viewport.height)
            .viewport(viewport);

        if let Some(path) = &config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        if !config.headless {
            builder = builder.with_head();
        }

        builder = builder
            .no_sandbox()
            .request_timeout(config.timings.navigation_timeout)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");

        if config.debug {
            builder = builder.arg("--enable-logging=stderr").arg("--v=1");
        }

        builder.build().map_err(ScraperError::BrowserInit)
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self, config: &FeedConfig) -> Result<Box<dyn PageHandle>, ScraperError> {
        info!("Initializing browser...");

        let browser_config = Self::browser_config(config)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(ScraperError::BrowserInit(e.to_string()));
            }
        };

        info!(
            "Browser initialized ({}x{})",
            config.viewport.width, config.viewport.height
        );

        Ok(Box::new(ChromiumPage {
            browser: Some(browser),
            page: Some(page),
            handler_task: Some(handler_task),
            debug: config.debug,
        }))
    }
}

/// 起動済みのChromiumページ
pub struct ChromiumPage {
    browser: Option<Browser>,
    page: Option<Page>,
    handler_task: Option<JoinHandle<()>>,
    debug: bool,
}

impl ChromiumPage {
    fn get_page(&self) -> Result<&Page, ScraperError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("ブラウザが初期化されていません".into()))
    }

    async fn eval_bool(&self, script: &str) -> Result<bool, ScraperError> {
        let result = self
            .get_page()?
            .evaluate(script)
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;
        Ok(result.into_value::<bool>().unwrap_or(false))
    }

    /// DOMの構築完了まで待機
    async fn wait_dom_ready(&self) -> Result<(), ScraperError> {
        loop {
            if self
                .eval_bool("document.readyState !== 'loading'")
                .await
                .unwrap_or(false)
            {
                return Ok(());
            }
            sleep(Duration::from_millis(READY_STATE_POLL_INTERVAL_MS)).await;
        }
    }

    async fn go(&self, url: &str, wait_until: WaitUntil) -> Result<(), ScraperError> {
        let page = self.get_page()?;
        match wait_until {
            WaitUntil::DomContentLoaded => {
                page.execute(NavigateParams::new(url))
                    .await
                    .map_err(|e| ScraperError::Navigation(e.to_string()))?;
                self.wait_dom_ready().await
            }
            WaitUntil::Load => {
                page.goto(url)
                    .await
                    .map_err(|e| ScraperError::Navigation(e.to_string()))?;
                page.wait_for_navigation()
                    .await
                    .map_err(|e| ScraperError::Navigation(e.to_string()))?;
                Ok(())
            }
        }
    }

    /// デバッグ用スクリーンショットをログ出力
    async fn log_screenshot(&self) {
        let Ok(page) = self.get_page() else {
            return;
        };
        match page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
        {
            Ok(screenshot) => {
                use base64::Engine;
                let encoded = base64::engine::general_purpose::STANDARD.encode(&screenshot);
                debug!("Failure screenshot: data:image/png;base64,{}", encoded);
            }
            Err(e) => debug!("Failed to capture screenshot: {}", e),
        }
    }
}

#[async_trait]
impl PageHandle for ChromiumPage {
    async fn navigate(
        &mut self,
        url: &str,
        wait_until: WaitUntil,
        limit: Duration,
    ) -> Result<(), ScraperError> {
        let start = Instant::now();

        let result = match timeout(limit, self.go(url, wait_until)).await {
            Ok(result) => result,
            Err(_) => Err(ScraperError::NavigationTimeout {
                url: url.to_string(),
                timeout: limit,
            }),
        };

        match &result {
            Ok(()) => info!("Navigation complete after {:?}", start.elapsed()),
            Err(_) if self.debug => self.log_screenshot().await,
            Err(_) => {}
        }

        result
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        limit: Duration,
    ) -> Result<(), ScraperError> {
        let literal = serde_json::to_string(selector)
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;
        let script = format!("document.querySelector({}) !== null", literal);

        let start = Instant::now();
        loop {
            match self.eval_bool(&script).await {
                Ok(true) => {
                    debug!("Selector {} found after {:?}", selector, start.elapsed());
                    return Ok(());
                }
                Ok(false) => {}
                Err(e) => debug!("Selector check error: {}", e),
            }

            if start.elapsed() >= limit {
                return Err(ScraperError::ContentWaitTimeout {
                    selector: selector.to_string(),
                    timeout: limit,
                });
            }

            sleep(Duration::from_millis(SELECTOR_POLL_INTERVAL_MS)).await;
        }
    }

    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value, ScraperError> {
        let result = self
            .get_page()?
            .evaluate(script)
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        // undefined を返すスクリプトは null として扱う
        Ok(result
            .into_value::<serde_json::Value>()
            .unwrap_or(serde_json::Value::Null))
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                debug!("Failed to close page: {}", e);
            }
        }

        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser: {}", e);
            }
            if let Err(e) = browser.wait().await {
                debug!("Failed to wait for browser exit: {}", e);
            }
        }

        if let Some(task) = self.handler_task.take() {
            task.abort();
        }

        info!("Browser closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config_builds() {
        let config = FeedConfig::default()
            .with_chrome_path("/usr/bin/chromium")
            .with_debug(true);
        assert!(ChromiumLauncher::browser_config(&config).is_ok());
    }

    #[tokio::test]
    #[ignore] // 実ブラウザでの確認用: cargo test live_feed_scrape -- --ignored --nocapture
    async fn live_feed_scrape() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info,video_feed_scraper=debug")
            .try_init();

        let config = FeedConfig::from_env();
        let videos = crate::feed::load_and_extract(&ChromiumLauncher::new(), &config)
            .await
            .expect("scrape failed");

        println!("Videos: {}", videos.len());
        for v in videos.iter().take(10) {
            println!("  - {} ({}) {}", v.title(), v.channel(), v.url());
        }
    }
}
