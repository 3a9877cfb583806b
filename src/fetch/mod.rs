//! 判定データの取得
//!
//! ソースはURL（HTTP GET）またはローカルパス。取得・解析の失敗は
//! そのまま致命的エラーとして返す（リトライなし）。

pub mod xlsx;

use crate::error::{LexBenchError, Result};
use lexbench_common::{RawTable, SourceKind, SourceMeta};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 判定データのソース
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub location: String,
    pub kind: SourceKind,
    /// 判定が食い違った場合の優先度（大きいほど優先）
    #[serde(default)]
    pub priority: i32,
}

impl Source {
    pub fn new(location: impl Into<String>, kind: SourceKind, priority: i32) -> Self {
        Self {
            location: location.into(),
            kind,
            priority,
        }
    }

    pub fn is_remote(&self) -> bool {
        is_remote(&self.location)
    }

    pub fn meta(&self) -> SourceMeta {
        SourceMeta {
            location: self.location.clone(),
            kind: self.kind,
            priority: self.priority,
        }
    }
}

/// `KIND=LOCATION[@PRIORITY]` 形式
impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (kind, rest) = s
            .split_once('=')
            .ok_or_else(|| format!("KIND=LOCATION 形式で指定してください: {}", s))?;
        let kind: SourceKind = kind.trim().parse()?;

        // 末尾の @数値 だけを優先度として扱う（URL中の@は残す）
        let (location, priority) = match rest.rsplit_once('@') {
            Some((loc, p)) if p.trim().parse::<i32>().is_ok() => {
                (loc, p.trim().parse::<i32>().unwrap_or_default())
            }
            _ => (rest, 0),
        };

        let location = location.trim();
        if location.is_empty() {
            return Err(format!("LOCATION が空です: {}", s));
        }

        Ok(Source::new(location, kind, priority))
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.kind, self.location)?;
        if self.priority != 0 {
            write!(f, "@{}", self.priority)?;
        }
        Ok(())
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// ソースのバイト列を取得
pub async fn fetch_bytes(location: &str, timeout: Duration) -> Result<Vec<u8>> {
    if is_remote(location) {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LexBenchError::Fetch(e.to_string()))?;

        tracing::debug!(url = location, "HTTP GET");
        let response = client
            .get(location)
            .send()
            .await
            .map_err(|e| LexBenchError::Fetch(format!("{}: {}", location, e)))?;

        if !response.status().is_success() {
            return Err(LexBenchError::HttpStatus {
                status: response.status().as_u16(),
                url: location.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LexBenchError::Fetch(format!("{}: {}", location, e)))?;
        Ok(bytes.to_vec())
    } else {
        let path = Path::new(location);
        if !path.exists() {
            return Err(LexBenchError::FileNotFound(location.to_string()));
        }
        Ok(tokio::fs::read(path).await?)
    }
}

/// XLSX かどうか（拡張子または ZIP シグネチャ）
pub fn is_xlsx(location: &str, bytes: &[u8]) -> bool {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    path.to_lowercase().ends_with(".xlsx") || bytes.starts_with(b"PK\x03\x04")
}

/// 取得済みのバイト列を表として解釈
pub fn parse_table(kind: SourceKind, location: &str, bytes: &[u8]) -> Result<RawTable> {
    let table = match kind {
        SourceKind::Benchmark => RawTable::from_delimited(bytes, b'\t')?,
        SourceKind::Spreadsheet if is_xlsx(location, bytes) => xlsx::read_first_sheet(bytes)?,
        SourceKind::Spreadsheet => RawTable::from_delimited(bytes, b',')?,
    };
    tracing::debug!(location, rows = table.len(), columns = table.headers.len(), "表を読み込みました");
    Ok(table)
}

/// ソースを取得して表として読み込む
pub async fn load_source(source: &Source, timeout: Duration) -> Result<RawTable> {
    let bytes = fetch_bytes(&source.location, timeout).await?;
    parse_table(source.kind, &source.location, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_location() {
        let s: Source = "benchmark=data/bench.tsv".parse().unwrap();
        assert_eq!(s, Source::new("data/bench.tsv", SourceKind::Benchmark, 0));

        let s: Source = "spreadsheet=https://example.org/pub?output=csv@5".parse().unwrap();
        assert_eq!(s.location, "https://example.org/pub?output=csv");
        assert_eq!(s.priority, 5);
        assert!(s.is_remote());
    }

    #[test]
    fn test_parse_source_keeps_userinfo_at() {
        let s: Source = "sheet=https://user@example.org/x.csv".parse().unwrap();
        assert_eq!(s.location, "https://user@example.org/x.csv");
        assert_eq!(s.priority, 0);
    }

    #[test]
    fn test_parse_source_errors() {
        assert!("data.tsv".parse::<Source>().is_err());
        assert!("xml=data.xml".parse::<Source>().is_err());
        assert!("tsv=".parse::<Source>().is_err());
    }

    #[test]
    fn test_source_display() {
        let s = Source::new("a.csv", SourceKind::Spreadsheet, -1);
        assert_eq!(s.to_string(), "spreadsheet=a.csv@-1");
        let reparsed: Source = s.to_string().parse().unwrap();
        assert_eq!(reparsed, s);
    }

    #[test]
    fn test_is_xlsx() {
        assert!(is_xlsx("judgments.XLSX", b""));
        assert!(is_xlsx("https://example.org/export?format=xlsx", b"PK\x03\x04rest"));
        assert!(!is_xlsx("https://example.org/pub?output=csv", b"greek,latin"));
    }

    #[test]
    fn test_parse_table_by_kind() {
        let tsv = b"greek\ttrans_a\tvalid_a\n\xce\xbb\tratio\t1\n";
        let table = parse_table(SourceKind::Benchmark, "b.tsv", tsv).unwrap();
        assert_eq!(table.headers.len(), 3);

        let csv = b"greek,latin_1,valid_1\n";
        let table = parse_table(SourceKind::Spreadsheet, "s.csv", csv).unwrap();
        assert_eq!(table.headers[1], "latin_1");
    }

    #[tokio::test]
    async fn test_fetch_missing_local_file() {
        let err = fetch_bytes("/nonexistent/judgments.csv", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LexBenchError::FileNotFound(_)));
    }
}
