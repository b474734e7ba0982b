use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{FeedConfig, WaitUntil};
use crate::error::ScraperError;

/// ブラウザの起動
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// ブラウザを起動して空のページを返す
    async fn launch(&self, config: &FeedConfig) -> Result<Box<dyn PageHandle>, ScraperError>;
}

/// 起動済みページの操作
#[async_trait]
pub trait PageHandle: Send {
    /// ページ遷移（timeout超過時は `NavigationTimeout`）
    async fn navigate(
        &mut self,
        url: &str,
        wait_until: WaitUntil,
        timeout: Duration,
    ) -> Result<(), ScraperError>;

    /// セレクタの出現を待機（timeout超過時は `ContentWaitTimeout`）
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError>;

    /// JavaScriptを評価して結果をJSONで返す
    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value, ScraperError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), ScraperError>;
}

#[async_trait]
impl<L: BrowserLauncher + ?Sized> BrowserLauncher for Arc<L> {
    async fn launch(&self, config: &FeedConfig) -> Result<Box<dyn PageHandle>, ScraperError> {
        (**self).launch(config).await
    }
}
