//! ベンチマーク構築
//!
//! ## 処理フロー
//! 1. ソースを順に取得（URL / ローカル）
//! 2. 横持ちの表を (greek, latin, valid) に整形
//! 3. 正規化・未判定除外・優先度付き重複除去
//! 4. 固定パスへ書き出し（既存ファイルは置き換え）+ マニフェスト保存

pub mod manifest;

pub use manifest::{BenchmarkManifest, ManifestSource};

use crate::error::{LexBenchError, Result};
use crate::fetch::{self, Source};
use indicatif::{ProgressBar, ProgressStyle};
use lexbench_common::{reshape, BenchmarkTable, MergeReport, Orthography, WordPairJudgment};
use std::path::Path;
use std::time::Duration;

/// 構築結果
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub table: BenchmarkTable,
    pub report: MergeReport,
    pub manifest: BenchmarkManifest,
}

/// 構築パラメータ
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub orthography: Orthography,
    pub timeout: Duration,
    pub verbose: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            orthography: Orthography::Nfkc,
            timeout: Duration::from_secs(60),
            verbose: false,
        }
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

/// 全ソースを取得して整形
async fn collect_judgments(
    sources: &[Source],
    options: &BuildOptions,
) -> Result<Vec<(Source, Vec<WordPairJudgment>)>> {
    let pb = progress_bar(sources.len() as u64);
    let mut collected = Vec::with_capacity(sources.len());

    for source in sources {
        pb.set_message(source.location.clone());

        let table = fetch::load_source(source, options.timeout).await?;
        let judgments = reshape(&table).map_err(|e| {
            LexBenchError::Parse(format!("{}: {}", source.location, e))
        })?;

        if options.verbose {
            pb.println(format!("  {} ({}): {}行", source.location, source.kind, judgments.len()));
        }
        tracing::debug!(location = %source.location, rows = judgments.len(), "整形しました");

        collected.push((source.clone(), judgments));
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(collected)
}

/// ベンチマークを構築して `output` に書き出す
pub async fn build_benchmark(
    sources: &[Source],
    output: &Path,
    options: &BuildOptions,
) -> Result<BuildSummary> {
    if sources.is_empty() {
        return Err(LexBenchError::NoSources);
    }

    let collected = collect_judgments(sources, options).await?;

    let manifest_sources: Vec<ManifestSource> = collected
        .iter()
        .map(|(s, j)| ManifestSource {
            location: s.location.clone(),
            kind: s.kind,
            priority: s.priority,
            rows: j.len(),
        })
        .collect();

    let (table, report) = BenchmarkTable::merge(
        collected.into_iter().map(|(s, j)| (s.meta(), j)).collect(),
        options.orthography,
    );

    {
        let non_greek = table.non_greek_keys();
        if !non_greek.is_empty() {
            tracing::warn!(
                count = non_greek.len(),
                first = non_greek.iter().next().copied().unwrap_or_default(),
                "ギリシア文字を含まない見出し語があります"
            );
        }
    }

    if report.conflicts > 0 {
        tracing::warn!(conflicts = report.conflicts, "判定が食い違うペアがあります（優先度で解決）");
    }

    let mut buffer = Vec::new();
    table.write_csv(&mut buffer)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, &buffer)?;

    let manifest = BenchmarkManifest::new(
        options.orthography,
        manifest_sources,
        table.len(),
        table.valid_count(),
        report.clone(),
        &buffer,
    );
    manifest.save(output)?;

    Ok(BuildSummary {
        table,
        report,
        manifest,
    })
}

/// ベンチマークを読み込む（なければ構築する）
pub async fn ensure_benchmark(
    sources: &[Source],
    path: &Path,
    options: &BuildOptions,
    rebuild: bool,
) -> Result<BenchmarkTable> {
    if path.exists() && !rebuild {
        let bytes = std::fs::read(path)?;
        if let Some(manifest) = BenchmarkManifest::load(path) {
            // キーの表記が違うと候補との結合がすべて外れる
            if manifest.orthography != options.orthography {
                return Err(LexBenchError::Config(format!(
                    "{} は表記 {} で構築されています（指定: {}）。--rebuild で再構築してください",
                    path.display(),
                    manifest.orthography,
                    options.orthography
                )));
            }
            if !manifest.matches(&bytes) {
                tracing::warn!(path = %path.display(), "ベンチマークがマニフェストと一致しません");
            }
        }
        return Ok(BenchmarkTable::read_csv(bytes.as_slice())?);
    }

    println!("  ベンチマークを構築します: {}", path.display());
    let summary = build_benchmark(sources, path, options).await?;
    Ok(summary.table)
}
