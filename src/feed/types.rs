//! フィード関連の型定義

use serde::{Deserialize, Serialize};

/// 動画1件分の抽出結果
///
/// タイトルとURLは空にならない。生成は [`VideoRecord::new`] 経由のみ。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawVideo")]
pub struct VideoRecord {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Channel")]
    channel: String,
    #[serde(rename = "URL")]
    url: String,
}

impl VideoRecord {
    /// タイトルかURLが空なら `None`
    pub fn new(
        title: impl Into<String>,
        channel: impl Into<String>,
        url: impl Into<String>,
    ) -> Option<Self> {
        let title = title.into();
        let url = url.into();
        if title.is_empty() || url.is_empty() {
            return None;
        }
        Some(Self {
            title,
            channel: channel.into(),
            url,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// 検証前のレコード（ページ評価結果・CSV行の両方に対応）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawVideo {
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Channel")]
    pub channel: String,
    #[serde(alias = "URL")]
    pub url: String,
}

impl TryFrom<RawVideo> for VideoRecord {
    type Error = String;

    fn try_from(raw: RawVideo) -> Result<Self, Self::Error> {
        VideoRecord::new(raw.title, raw.channel, raw.url)
            .ok_or_else(|| "title and url must not be empty".to_string())
    }
}

/// ページ構造に依存するセレクタ一式
///
/// ページのレイアウト変更で壊れる前提。変更時は `version` を更新して差し替える。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    pub version: String,
    /// 主要コンテンツ描画済みの目印
    pub content_marker: String,
    /// 動画サムネイルのリンク
    pub anchor: String,
    /// リンクを囲む動画カード（いずれかに一致する最も近い祖先）
    pub containers: Vec<String>,
    pub title: String,
    pub channel: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            version: "youtube-2024".to_string(),
            content_marker: "#contents".to_string(),
            anchor: r#"a#thumbnail[href*="/watch"]"#.to_string(),
            containers: vec![
                "ytd-rich-item-renderer".to_string(),
                "ytd-video-renderer".to_string(),
            ],
            title: "#video-title".to_string(),
            channel: "#channel-name a, ytd-channel-name a".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_record_requires_title_and_url() {
        assert!(VideoRecord::new("", "chan", "https://youtu.be/x").is_none());
        assert!(VideoRecord::new("title", "chan", "").is_none());

        let record = VideoRecord::new("title", "", "https://youtu.be/x").unwrap();
        assert_eq!(record.title(), "title");
        assert_eq!(record.channel(), "");
        assert_eq!(record.url(), "https://youtu.be/x");
    }

    #[test]
    fn test_identical_fields_are_equal() {
        let a = VideoRecord::new("t", "c", "https://youtu.be/1").unwrap();
        let b = VideoRecord::new("t", "c", "https://youtu.be/1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deserialize_rejects_incomplete() {
        let ok: Result<VideoRecord, _> = serde_json::from_str(
            r#"{"title":"t","channel":"c","url":"https://youtu.be/1"}"#,
        );
        assert!(ok.is_ok());

        let missing_url: Result<VideoRecord, _> =
            serde_json::from_str(r#"{"title":"t","channel":"c"}"#);
        assert!(missing_url.is_err());
    }

    #[test]
    fn test_default_selectors() {
        let selectors = SelectorSet::default();
        assert_eq!(selectors.containers.len(), 2);
        assert!(selectors.anchor.contains("/watch"));
    }
}
