use std::path::PathBuf;
use std::time::Duration;

use crate::feed::SelectorSet;

/// ビジネスニュースフィード
pub const DEFAULT_TARGET_URL: &str = "https://www.youtube.com/feed/news_destination/business";
pub const DEFAULT_OUTPUT_PATH: &str = "./output/business_videos.csv";

/// ナビゲーション完了の判定方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// DOMの構築完了（readyState != "loading"）で進む
    DomContentLoaded,
    /// loadイベントまで待つ
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// 待機・スクロールのタイミング設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timings {
    pub navigation_timeout: Duration,
    pub content_timeout: Duration,
    /// 非同期レンダリング待ち
    pub warmup: Duration,
    pub scroll_cycles: u32,
    pub scroll_pause: Duration,
    /// スクロール後の最終待機
    pub settle: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(60),
            content_timeout: Duration::from_secs(60),
            warmup: Duration::from_secs(5),
            scroll_cycles: 3,
            scroll_pause: Duration::from_secs(2),
            settle: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub target_url: String,
    pub output_path: PathBuf,
    pub headless: bool,
    pub debug: bool,
    /// 未指定ならchromiumoxideの自動検出に任せる
    pub chrome_path: Option<PathBuf>,
    pub viewport: Viewport,
    pub wait_until: WaitUntil,
    pub timings: Timings,
    pub selectors: SelectorSet,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            headless: true,
            debug: false,
            chrome_path: None,
            viewport: Viewport::default(),
            wait_until: WaitUntil::DomContentLoaded,
            timings: Timings::default(),
            selectors: SelectorSet::default(),
        }
    }
}

impl FeedConfig {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            ..Default::default()
        }
    }

    /// 環境変数で上書きした設定を作成
    ///
    /// - `CHROME_PATH` / `CHROMIUM_PATH`: ブラウザ実行ファイル
    /// - `FEED_SCRAPER_HEADLESS`: `false` でウィンドウ表示
    /// - `FEED_SCRAPER_DEBUG`: `true` でブラウザログとスクリーンショット出力
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("CHROME_PATH").or_else(|_| std::env::var("CHROMIUM_PATH")) {
            config.chrome_path = Some(PathBuf::from(path));
        }
        if let Some(headless) = env_flag("FEED_SCRAPER_HEADLESS") {
            config.headless = headless;
        }
        if let Some(debug) = env_flag("FEED_SCRAPER_DEBUG") {
            config.debug = debug;
        }

        config
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    pub fn with_wait_until(mut self, wait_until: WaitUntil) -> Self {
        self.wait_until = wait_until;
        self
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_selectors(mut self, selectors: SelectorSet) -> Self {
        self.selectors = selectors;
        self
    }
}

fn env_flag(key: &str) -> Option<bool> {
    parse_flag(&std::env::var(key).ok()?)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
