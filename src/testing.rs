//! テスト用のフェイクブラウザ

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::{FeedConfig, Timings, WaitUntil};
use crate::error::ScraperError;
use crate::traits::{BrowserLauncher, PageHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Launch,
    Navigate(String),
    WaitForSelector(String),
    Scroll,
    Extract,
    Close,
}

/// 呼び出しを記録するフェイク
#[derive(Clone, Default)]
pub struct FakeBrowser {
    pub navigation_times_out: bool,
    pub marker_missing: bool,
    pub evaluate_fails: bool,
    pub payload: Value,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeBrowser {
    pub fn with_records(records: Value) -> Self {
        Self {
            payload: json!({ "records": records, "skipped": 0 }),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BrowserLauncher for FakeBrowser {
    async fn launch(&self, _config: &FeedConfig) -> Result<Box<dyn PageHandle>, ScraperError> {
        self.record(Call::Launch);
        Ok(Box::new(FakePage {
            browser: self.clone(),
        }))
    }
}

pub struct FakePage {
    browser: FakeBrowser,
}

#[async_trait]
impl PageHandle for FakePage {
    async fn navigate(
        &mut self,
        url: &str,
        _wait_until: WaitUntil,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        self.browser.record(Call::Navigate(url.to_string()));
        if self.browser.navigation_times_out {
            return Err(ScraperError::NavigationTimeout {
                url: url.to_string(),
                timeout,
            });
        }
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        self.browser
            .record(Call::WaitForSelector(selector.to_string()));
        if self.browser.marker_missing {
            return Err(ScraperError::ContentWaitTimeout {
                selector: selector.to_string(),
                timeout,
            });
        }
        Ok(())
    }

    async fn evaluate(&mut self, script: &str) -> Result<Value, ScraperError> {
        if self.browser.evaluate_fails {
            return Err(ScraperError::JavaScript("evaluation failed".into()));
        }
        if script.contains("scrollBy") {
            self.browser.record(Call::Scroll);
            return Ok(Value::Null);
        }
        self.browser.record(Call::Extract);
        Ok(self.browser.payload.clone())
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        self.browser.record(Call::Close);
        Ok(())
    }
}

/// 待機なしのタイミング
pub fn instant_timings() -> Timings {
    Timings {
        navigation_timeout: Duration::from_millis(50),
        content_timeout: Duration::from_millis(50),
        warmup: Duration::ZERO,
        scroll_cycles: 3,
        scroll_pause: Duration::ZERO,
        settle: Duration::ZERO,
    }
}

/// テストごとに一意な一時ファイルパス
pub fn temp_csv_path(label: &str) -> std::path::PathBuf {
    let unique_id = format!(
        "{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    );
    std::env::temp_dir()
        .join(format!("video-feed-scraper-{}-{}", label, unique_id))
        .join("videos.csv")
}
