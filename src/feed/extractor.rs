//! ページからの動画レコード抽出

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ScraperError;
use crate::traits::PageHandle;

use super::types::{RawVideo, SelectorSet, VideoRecord};

/// 評価スクリプトの戻り値
#[derive(Debug, Deserialize)]
struct ExtractionPayload {
    records: Vec<RawVideo>,
    #[serde(default)]
    skipped: usize,
}

/// 抽出用のJavaScriptを生成
///
/// セレクタはJSONリテラルとして埋め込むので、引用符を含んでいても壊れない。
pub fn extraction_script(selectors: &SelectorSet) -> Result<String, ScraperError> {
    let sel = serde_json::to_string(selectors)
        .map_err(|e| ScraperError::Extraction(format!("selector encoding: {}", e)))?;

    Ok(format!(
        r#"
        (() => {{
            const sel = {sel};
            const containers = sel.containers.join(', ');
            const records = [];
            let skipped = 0;
            for (const anchor of document.querySelectorAll(sel.anchor)) {{
                const card = anchor.closest(containers);
                if (!card) {{
                    skipped++;
                    continue;
                }}
                const titleEl = card.querySelector(sel.title);
                const channelEl = card.querySelector(sel.channel);
                records.push({{
                    title: titleEl ? titleEl.textContent.trim() : '',
                    channel: channelEl ? channelEl.textContent.trim() : '',
                    url: anchor.href || '',
                }});
            }}
            return {{ records, skipped }};
        }})()
        "#
    ))
}

/// 評価結果をVideoRecordに変換（タイトルかURLが空のものは捨てる）
pub fn parse_payload(value: Value) -> Result<Vec<VideoRecord>, ScraperError> {
    let payload: ExtractionPayload = serde_json::from_value(value)
        .map_err(|e| ScraperError::Extraction(format!("unexpected payload: {}", e)))?;

    let found = payload.records.len();
    let videos: Vec<VideoRecord> = payload
        .records
        .into_iter()
        .filter_map(|raw| {
            let kept = VideoRecord::new(raw.title.clone(), raw.channel, raw.url.clone());
            if kept.is_none() {
                debug!("Dropping incomplete record: title={:?}, url={:?}", raw.title, raw.url);
            }
            kept
        })
        .collect();

    info!(
        "Extracted {} videos ({} anchors without a card, {} incomplete)",
        videos.len(),
        payload.skipped,
        found - videos.len()
    );

    Ok(videos)
}

/// 読み込み済みページから動画一覧を取得
pub async fn extract_videos(
    page: &mut dyn PageHandle,
    selectors: &SelectorSet,
) -> Result<Vec<VideoRecord>, ScraperError> {
    info!("Extracting videos with selector set {}", selectors.version);
    let script = extraction_script(selectors)?;
    let value = page.evaluate(&script).await?;
    parse_payload(value)
}
