//! 表形式データの読み込みと整形
//!
//! 判定データは横持ち（1行に複数の訳語と判定）で配布される:
//! - スプレッドシート: `greek, trans_a, valid_a, trans_b, valid_b`
//! - ベンチマークTSV: `greek, trans_<label>, valid_<label>` がラベル数だけ続く
//!
//! どちらも `reshape` で (greek, latin, valid) の縦持ちに変換する。

use crate::error::{Error, Result};
use crate::types::WordPairJudgment;
use regex::Regex;
use std::io::Read;

/// ヘッダ付きの生の表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// 区切り文字付きテキスト（CSV/TSV）を読み込む
    pub fn from_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// ヘッダ名で列番号を探す（大文字小文字無視）
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }
}

/// 訳語列と判定列の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPair {
    pub label: String,
    pub trans_col: usize,
    pub valid_col: usize,
}

/// ヘッダから (訳語列, 判定列) の組をラベルごとに抽出
pub fn label_pairs(headers: &[String]) -> Vec<LabelPair> {
    lazy_static::lazy_static! {
        static ref TRANS_RE: Regex = Regex::new(r"(?i)^(?:trans|latin)[_ .]?(.+)$").unwrap();
        static ref VALID_RE: Regex = Regex::new(r"(?i)^valid[_ .]?(.+)$").unwrap();
    }

    let mut pairs = Vec::new();

    for (trans_col, header) in headers.iter().enumerate() {
        let Some(cap) = TRANS_RE.captures(header) else {
            continue;
        };
        let label = cap[1].to_string();

        let valid_col = headers.iter().position(|h| {
            VALID_RE
                .captures(h)
                .map(|c| c[1].eq_ignore_ascii_case(&label))
                .unwrap_or(false)
        });

        if let Some(valid_col) = valid_col {
            pairs.push(LabelPair {
                label,
                trans_col,
                valid_col,
            });
        }
    }

    pairs
}

/// 判定セルを解釈（空・NA は未判定）
pub fn parse_validity(cell: &str) -> std::result::Result<Option<bool>, String> {
    match cell.trim().to_lowercase().as_str() {
        "" | "na" | "n/a" | "?" => Ok(None),
        "1" | "1.0" | "true" | "t" | "yes" | "y" => Ok(Some(true)),
        "0" | "0.0" | "false" | "f" | "no" | "n" => Ok(Some(false)),
        other => Err(format!("判定値を解釈できません: {:?}", other)),
    }
}

/// 横持ちの表を (greek, latin, valid) に変換
///
/// 訳語セルが空のラベルは出力しない。判定セルが空のものは
/// `valid = None`（未判定）として出力する。
pub fn reshape(table: &RawTable) -> Result<Vec<WordPairJudgment>> {
    let greek_col = table
        .column("greek")
        .ok_or_else(|| Error::Parse("greek 列がありません".into()))?;

    let pairs = label_pairs(&table.headers);
    if pairs.is_empty() {
        return Err(Error::Parse(format!(
            "訳語列と判定列の組が見つかりません: {}",
            table.headers.join(", ")
        )));
    }

    let mut judgments = Vec::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let greek = row.get(greek_col).map(|s| s.trim()).unwrap_or("");
        if greek.is_empty() {
            continue;
        }

        for pair in &pairs {
            let latin = row.get(pair.trans_col).map(|s| s.trim()).unwrap_or("");
            if latin.is_empty() {
                continue;
            }

            let cell = row.get(pair.valid_col).map(String::as_str).unwrap_or("");
            // ヘッダ行を1行目として数える
            let valid = parse_validity(cell).map_err(|e| {
                Error::Parse(format!(
                    "{}行目 {}列: {}",
                    row_idx + 2,
                    table.headers[pair.valid_col],
                    e
                ))
            })?;

            judgments.push(WordPairJudgment::new(greek, latin, valid));
        }
    }

    Ok(judgments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_delimited_tsv() {
        let tsv = "greek\ttrans_a\tvalid_a\nλόγος\tratio\t1\n";
        let table = RawTable::from_delimited(tsv.as_bytes(), b'\t').unwrap();
        assert_eq!(table.headers, headers(&["greek", "trans_a", "valid_a"]));
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][1], "ratio");
    }

    #[test]
    fn test_from_delimited_strips_bom() {
        let csv = "\u{feff}greek,latin_1,valid_1\nλόγος,ratio,1\n";
        let table = RawTable::from_delimited(csv.as_bytes(), b',').unwrap();
        assert_eq!(table.column("greek"), Some(0));
    }

    #[test]
    fn test_label_pairs() {
        let h = headers(&["greek", "trans_a", "valid_a", "trans_b", "valid_b", "note"]);
        let pairs = label_pairs(&h);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], LabelPair { label: "a".into(), trans_col: 1, valid_col: 2 });
        assert_eq!(pairs[1], LabelPair { label: "b".into(), trans_col: 3, valid_col: 4 });
    }

    #[test]
    fn test_label_pairs_unordered_columns() {
        let h = headers(&["Greek", "valid_2", "Latin_1", "Valid_1", "latin_2"]);
        let pairs = label_pairs(&h);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].valid_col, 3);
        assert_eq!(pairs[1].valid_col, 1);
    }

    #[test]
    fn test_label_pair_without_validity_is_ignored() {
        let h = headers(&["greek", "trans_a", "trans_b", "valid_b"]);
        let pairs = label_pairs(&h);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].label, "b");
    }

    #[test]
    fn test_parse_validity() {
        assert_eq!(parse_validity("1"), Ok(Some(true)));
        assert_eq!(parse_validity("TRUE"), Ok(Some(true)));
        assert_eq!(parse_validity(" 0 "), Ok(Some(false)));
        assert_eq!(parse_validity("NA"), Ok(None));
        assert_eq!(parse_validity(""), Ok(None));
        assert!(parse_validity("maybe").is_err());
    }

    #[test]
    fn test_reshape_wide() {
        let tsv = "greek\ttrans_a\tvalid_a\ttrans_b\tvalid_b\n\
                   λόγος\tratio\t1\tverbum\t0\n\
                   ἀνήρ\tvir\t1\t\t\n\
                   θεός\tdeus\t\tnumen\t1\n";
        let table = RawTable::from_delimited(tsv.as_bytes(), b'\t').unwrap();
        let rows = reshape(&table).unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], WordPairJudgment::new("λόγος", "ratio", Some(true)));
        assert_eq!(rows[1], WordPairJudgment::new("λόγος", "verbum", Some(false)));
        assert_eq!(rows[2], WordPairJudgment::new("ἀνήρ", "vir", Some(true)));
        assert_eq!(rows[3], WordPairJudgment::new("θεός", "deus", None));
        assert_eq!(rows[4], WordPairJudgment::new("θεός", "numen", Some(true)));
    }

    #[test]
    fn test_reshape_short_rows() {
        let csv = "greek,latin_1,valid_1,latin_2,valid_2\nλόγος,ratio,1\n";
        let table = RawTable::from_delimited(csv.as_bytes(), b',').unwrap();
        let rows = reshape(&table).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_reshape_missing_greek_column() {
        let table = RawTable::new(headers(&["word", "trans_a", "valid_a"]), vec![]);
        assert!(matches!(reshape(&table), Err(Error::Parse(_))));
    }

    #[test]
    fn test_reshape_no_label_pairs() {
        let table = RawTable::new(headers(&["greek", "latin"]), vec![]);
        assert!(matches!(reshape(&table), Err(Error::Parse(_))));
    }

    #[test]
    fn test_reshape_bad_validity_reports_row() {
        let csv = "greek,trans_a,valid_a\nλόγος,ratio,1\nἀνήρ,vir,perhaps\n";
        let table = RawTable::from_delimited(csv.as_bytes(), b',').unwrap();
        let err = reshape(&table).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("3行目"), "{}", msg);
        assert!(msg.contains("valid_a"), "{}", msg);
    }
}
