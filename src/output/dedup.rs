//! CSVの重複行除去

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::ScraperError;

/// 重複除去の結果（ログ出力用）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupReport {
    pub original_rows: usize,
    pub unique_rows: usize,
    pub removed: usize,
}

/// ヘッダーを残して完全一致するデータ行を除去
///
/// 比較は行文字列の完全一致。出現順は最初に現れた順を保つ。
/// ヘッダーと同一のデータ行も重複として扱う。
pub fn dedupe_lines(content: &str) -> (String, DedupReport) {
    if content.is_empty() {
        return (String::new(), DedupReport::default());
    }

    let mut lines = content.split('\n');
    let header = lines.next().unwrap_or_default();

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(header);

    let mut original_rows = 0;
    let mut unique: Vec<&str> = Vec::new();
    for line in lines {
        original_rows += 1;
        if seen.insert(line) {
            unique.push(line);
        }
    }

    let report = DedupReport {
        original_rows,
        unique_rows: unique.len(),
        removed: original_rows - unique.len(),
    };

    let output = std::iter::once(header)
        .chain(unique)
        .collect::<Vec<_>>()
        .join("\n");

    (output, report)
}

/// CSVファイルの重複行を除去して上書き
pub fn dedupe_csv_file(path: &Path) -> Result<DedupReport, ScraperError> {
    let content = std::fs::read_to_string(path)?;
    let (deduped, report) = dedupe_lines(&content);
    std::fs::write(path, deduped)?;

    info!(
        "Deduplicated {:?}: {} rows -> {} rows ({} duplicates removed)",
        path, report.original_rows, report.unique_rows, report.removed
    );
    Ok(report)
}
