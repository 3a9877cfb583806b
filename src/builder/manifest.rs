//! ベンチマークのマニフェスト
//!
//! ベンチマークCSVの横に `<ファイル名>.manifest.json` を置き、
//! 構築に使ったソースと内容のSHA-256を記録する。

use crate::error::Result;
use lexbench_common::{MergeReport, Orthography, SourceKind};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const MANIFEST_SUFFIX: &str = ".manifest.json";

/// ソースごとの記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSource {
    pub location: String,
    pub kind: SourceKind,
    pub priority: i32,
    /// 整形後の行数（未判定を含む）
    pub rows: usize,
}

/// マニフェストファイルの構造
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkManifest {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 構築日時（RFC 3339）
    pub built_at: String,
    pub orthography: Orthography,
    pub sources: Vec<ManifestSource>,
    /// ベンチマークの行数
    pub rows: usize,
    /// 正解ペア数
    pub valid_rows: usize,
    pub report: MergeReport,
    /// ベンチマークCSVのSHA-256（16進）
    pub sha256: String,
}

impl BenchmarkManifest {
    const CURRENT_VERSION: u32 = 1;

    pub fn new(
        orthography: Orthography,
        sources: Vec<ManifestSource>,
        rows: usize,
        valid_rows: usize,
        report: MergeReport,
        csv_bytes: &[u8],
    ) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            built_at: chrono::Utc::now().to_rfc3339(),
            orthography,
            sources,
            rows,
            valid_rows,
            report,
            sha256: sha256_hex(csv_bytes),
        }
    }

    /// ベンチマークに対応するマニフェストのパス
    pub fn path_for(benchmark: &Path) -> PathBuf {
        let mut name = benchmark
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "benchmark.csv".into());
        name.push(MANIFEST_SUFFIX);
        benchmark.with_file_name(name)
    }

    /// マニフェストを読み込み（なし・破損・バージョン不一致は None）
    pub fn load(benchmark: &Path) -> Option<Self> {
        let path = Self::path_for(benchmark);
        let file = File::open(&path).ok()?;

        match serde_json::from_reader::<_, BenchmarkManifest>(BufReader::new(file)) {
            Ok(manifest) if manifest.version == Self::CURRENT_VERSION => Some(manifest),
            Ok(_) => {
                tracing::warn!(path = %path.display(), "マニフェストのバージョン不一致");
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "マニフェストを読めません");
                None
            }
        }
    }

    /// マニフェストを保存
    pub fn save(&self, benchmark: &Path) -> Result<()> {
        let file = File::create(Self::path_for(benchmark))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// ベンチマークの内容が記録時と一致するか
    pub fn matches(&self, csv_bytes: &[u8]) -> bool {
        self.sha256 == sha256_hex(csv_bytes)
    }

    /// ベンチマークとマニフェストを削除
    ///
    /// 何か削除した場合は true
    pub fn clear(benchmark: &Path) -> Result<bool> {
        let mut removed = false;
        for path in [benchmark.to_path_buf(), Self::path_for(benchmark)] {
            if path.exists() {
                std::fs::remove_file(&path)?;
                removed = true;
            }
        }
        Ok(removed)
    }
}

/// SHA-256 の16進表記
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
