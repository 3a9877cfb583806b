//! ベンチマーク表
//!
//! 複数ソースの判定データを統合し、(greek, latin) をキーに重複除去した
//! 判定済みペアの表。CSV (`greek,latin,valid`) として保存する。
//!
//! ## 統合ルール
//! 1. greek / latin を正規化（NFKC、または Tesserae 方式）
//! 2. 未判定の行を除外
//! 3. 同一キーで判定が食い違う場合は優先度の高いソースを採用
//!    （同じ優先度なら後から読んだソース）

use crate::error::{Error, Result};
use crate::normalize::{is_greek, Orthography};
use crate::table::parse_validity;
use crate::types::{Lang, WordPairJudgment};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};
use std::path::Path;

/// ソースの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// 公開スプレッドシート（1行に判定付き訳語2つ、CSV/XLSX）
    Spreadsheet,
    /// ベンチマークTSV（判定付き訳語がラベル数だけ並ぶ）
    Benchmark,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spreadsheet" | "sheet" | "csv" | "xlsx" => Ok(SourceKind::Spreadsheet),
            "benchmark" | "bench" | "tsv" => Ok(SourceKind::Benchmark),
            _ => Err(format!("Unknown source kind: {}. Use spreadsheet or benchmark", s)),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Spreadsheet => write!(f, "spreadsheet"),
            SourceKind::Benchmark => write!(f, "benchmark"),
        }
    }
}

/// 統合対象ソースの情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMeta {
    pub location: String,
    pub kind: SourceKind,
    /// 大きいほど優先
    pub priority: i32,
}

/// 統合結果の統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// 読み込んだ行数
    pub input_rows: usize,
    /// 未判定で除外した行数
    pub unjudged: usize,
    /// 正規化後に空になった行数
    pub empty: usize,
    /// 同一キーで判定が食い違った件数
    pub conflicts: usize,
    /// 同一キー・同一判定の重複件数
    pub duplicates: usize,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    valid: bool,
    priority: i32,
}

/// 重複除去済みのベンチマーク表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkTable {
    entries: BTreeMap<(String, String), bool>,
}

impl BenchmarkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// ソースごとの判定データを統合する
    ///
    /// `sources` は読み込み順。優先度が同じ場合は後のソースが勝つ。
    pub fn merge(
        sources: Vec<(SourceMeta, Vec<WordPairJudgment>)>,
        orthography: Orthography,
    ) -> (Self, MergeReport) {
        let mut merged: BTreeMap<(String, String), Entry> = BTreeMap::new();
        let mut report = MergeReport::default();

        for (meta, judgments) in sources {
            report.input_rows += judgments.len();

            for judgment in judgments {
                let Some(valid) = judgment.valid else {
                    report.unjudged += 1;
                    continue;
                };

                let greek = orthography.apply(Lang::Greek, &judgment.greek);
                let latin = orthography.apply(Lang::Latin, &judgment.latin);
                if greek.is_empty() || latin.is_empty() {
                    report.empty += 1;
                    continue;
                }

                let incoming = Entry {
                    valid,
                    priority: meta.priority,
                };

                match merged.get_mut(&(greek.clone(), latin.clone())) {
                    None => {
                        merged.insert((greek, latin), incoming);
                    }
                    Some(existing) => {
                        if existing.valid == valid {
                            report.duplicates += 1;
                        } else {
                            report.conflicts += 1;
                        }
                        if incoming.priority >= existing.priority {
                            *existing = incoming;
                        }
                    }
                }
            }
        }

        let entries = merged.into_iter().map(|(k, e)| (k, e.valid)).collect();
        (Self { entries }, report)
    }

    /// 判定を1件追加（既存キーは上書き）
    pub fn insert(&mut self, greek: impl Into<String>, latin: impl Into<String>, valid: bool) {
        self.entries.insert((greek.into(), latin.into()), valid);
    }

    /// (greek, latin) の判定
    pub fn judgment(&self, greek: &str, latin: &str) -> Option<bool> {
        self.entries
            .get(&(greek.to_string(), latin.to_string()))
            .copied()
    }

    /// greek をキーに持つ行があるか
    pub fn contains_greek(&self, greek: &str) -> bool {
        self.entries
            .range((greek.to_string(), String::new())..)
            .next()
            .map(|((g, _), _)| g == greek)
            .unwrap_or(false)
    }

    /// ギリシア文字を含まない greek キー
    pub fn non_greek_keys(&self) -> BTreeSet<&str> {
        self.entries
            .keys()
            .map(|(g, _)| g.as_str())
            .filter(|g| !is_greek(g))
            .collect()
    }

    /// 正解ペア数
    pub fn valid_count(&self) -> usize {
        self.entries.values().filter(|&&v| v).count()
    }

    /// 指定した greek キーに属する正解ペア数
    pub fn valid_count_for<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> usize {
        let keys: BTreeSet<&str> = keys.into_iter().collect();
        self.entries
            .iter()
            .filter(|((g, _), &v)| v && keys.contains(g.as_str()))
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// キー順に判定を列挙
    pub fn iter(&self) -> impl Iterator<Item = WordPairJudgment> + '_ {
        self.entries
            .iter()
            .map(|((g, l), &v)| WordPairJudgment::new(g.as_str(), l.as_str(), Some(v)))
    }

    /// CSV (`greek,latin,valid`) として書き出す
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["greek", "latin", "valid"])?;
        for ((greek, latin), valid) in &self.entries {
            wtr.write_record([greek.as_str(), latin.as_str(), if *valid { "1" } else { "0" }])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// CSV を読み込む（キーは NFKC 正規化して格納）
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let expected = ["greek", "latin", "valid"];
        let actual: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        if actual != expected {
            return Err(Error::Parse(format!(
                "ベンチマークのヘッダが不正です: {}",
                actual.join(",")
            )));
        }

        let mut table = Self::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            let valid = parse_validity(&record[2])
                .map_err(|e| Error::Parse(format!("{}行目: {}", idx + 2, e)))?
                .ok_or_else(|| Error::Parse(format!("{}行目: 判定が空です", idx + 2)))?;
            let greek = crate::normalize::nfkc(&record[0]);
            let latin = crate::normalize::nfkc(&record[1]);
            table.insert(greek, latin, valid);
        }

        Ok(table)
    }

    /// ファイルに保存（既存ファイルは置き換え）
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))
    }

    /// ファイルから読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::read_csv(std::io::BufReader::new(file))
    }
}
