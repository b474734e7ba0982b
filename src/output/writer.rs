//! CSV書き出し

use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use tracing::info;

use crate::error::ScraperError;
use crate::feed::VideoRecord;

pub const CSV_HEADER: &str = "Title,Channel,URL";

/// ヘッダー + 全フィールドをダブルクォートで囲んだ行（末尾改行なし）
pub fn to_csv_string(records: &[VideoRecord]) -> Result<String, ScraperError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScraperError::FileIO(e.into_error()))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| ScraperError::FileIO(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    let mut content = String::from(CSV_HEADER);
    let body = body.trim_end_matches('\n');
    if !body.is_empty() {
        content.push('\n');
        content.push_str(body);
    }
    Ok(content)
}

/// CSVファイルに上書き保存
pub fn write_csv(path: &Path, records: &[VideoRecord]) -> Result<(), ScraperError> {
    let content = to_csv_string(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;

    info!("Wrote {} videos to {:?}", records.len(), path);
    Ok(())
}

/// CSVテキストをVideoRecordに戻す
pub fn parse_csv(content: &str) -> Result<Vec<VideoRecord>, ScraperError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    reader
        .deserialize()
        .map(|row| row.map_err(ScraperError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::temp_csv_path;

    fn video(title: &str, channel: &str, url: &str) -> VideoRecord {
        VideoRecord::new(title, channel, url).unwrap()
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(to_csv_string(&[]).unwrap(), "Title,Channel,URL");
    }

    #[test]
    fn test_rows_are_quoted_in_order() {
        let records = vec![
            video("First", "Chan A", "https://www.youtube.com/watch?v=1"),
            video("Second", "", "https://www.youtube.com/watch?v=2"),
        ];

        let content = to_csv_string(&records).unwrap();

        assert_eq!(
            content,
            "Title,Channel,URL\n\
             \"First\",\"Chan A\",\"https://www.youtube.com/watch?v=1\"\n\
             \"Second\",\"\",\"https://www.youtube.com/watch?v=2\""
        );
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let records = vec![video(
            r#"He said "hi""#,
            "Chan",
            "https://www.youtube.com/watch?v=q",
        )];

        let content = to_csv_string(&records).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.starts_with(r#""He said ""hi""""#));

        let parsed = parse_csv(&content).unwrap();
        assert_eq!(parsed, records);
        assert_eq!(parsed[0].title(), r#"He said "hi""#);
    }

    #[test]
    fn test_round_trip_with_commas() {
        let records = vec![
            video("Stocks, bonds and you", "Money, Inc.", "https://www.youtube.com/watch?v=a"),
            video("Plain", "", "https://www.youtube.com/watch?v=b"),
        ];

        let parsed = parse_csv(&to_csv_string(&records).unwrap()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_write_csv_overwrites() {
        let path = temp_csv_path("writer");

        write_csv(&path, &[video("Old", "", "https://www.youtube.com/watch?v=o")]).unwrap();
        write_csv(&path, &[video("New", "", "https://www.youtube.com/watch?v=n")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("Old"));
        assert!(content.contains("\"New\""));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
