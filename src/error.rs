use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ナビゲーションタイムアウト: {url} ({timeout:?}以内に応答がありません)")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("コンテンツ待機タイムアウト: {selector} ({timeout:?})")]
    ContentWaitTimeout { selector: String, timeout: Duration },

    #[error("JavaScript実行エラー: {0}")]
    JavaScript(String),

    #[error("抽出エラー: {0}")]
    Extraction(String),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),
}

impl ScraperError {
    /// タイムアウト系のエラーか
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ScraperError::NavigationTimeout { .. } | ScraperError::ContentWaitTimeout { .. }
        )
    }

    /// ログ出力用の補足メッセージ
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ScraperError::NavigationTimeout { .. } => Some(
                "The page did not load in time. Check your internet connection; slow connections may need a longer navigation timeout.",
            ),
            ScraperError::ContentWaitTimeout { .. } => Some(
                "The feed content did not appear in time. The connection may be slow or the page layout may have changed.",
            ),
            ScraperError::FileIO(_) => Some("Check that the output directory is writable."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        let nav = ScraperError::NavigationTimeout {
            url: "https://example.com".into(),
            timeout: Duration::from_secs(60),
        };
        let wait = ScraperError::ContentWaitTimeout {
            selector: "#contents".into(),
            timeout: Duration::from_secs(60),
        };
        let js = ScraperError::JavaScript("boom".into());

        assert!(nav.is_timeout());
        assert!(wait.is_timeout());
        assert!(!js.is_timeout());
    }

    #[test]
    fn test_hint_mentions_connection() {
        let nav = ScraperError::NavigationTimeout {
            url: "https://example.com".into(),
            timeout: Duration::from_secs(60),
        };
        assert!(nav.hint().unwrap().contains("connection"));
        assert!(ScraperError::Extraction("x".into()).hint().is_none());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ScraperError = io.into();
        assert!(matches!(err, ScraperError::FileIO(_)));
    }
}
