//! 評価の実行
//!
//! ベンチマークと訳語候補を読み込み、閾値を走査して結果を出力する。

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::export;
use crate::scanner;
use lexbench_common::{evaluate, BenchmarkTable, Evaluation, EvaluationOptions, Orthography};
use std::path::{Path, PathBuf};

/// 評価の入力と出力先
#[derive(Debug, Clone)]
pub struct EvaluationJob {
    pub candidates: PathBuf,
    pub options: EvaluationOptions,
    pub orthography: Orthography,
    pub format: ExportFormat,
    pub output_dir: PathBuf,
}

/// 評価して結果を出力する
pub fn run_evaluation(benchmark: &BenchmarkTable, job: &EvaluationJob) -> Result<Evaluation> {
    let files = scanner::collect_candidate_files(&job.candidates)?;
    if files.len() > 1 {
        println!("  候補ファイル {}件を連結します", files.len());
    }
    let candidates = scanner::load_candidates(&files, job.orthography)?;
    println!("✔ 候補 {}件を読み込み", candidates.len());

    let evaluation = evaluate(benchmark, &candidates, &job.options)?;
    print_summary(&evaluation, job.options.rank);

    export::export_evaluation(&evaluation, &job.format, &job.output_dir)?;

    Ok(evaluation)
}

/// 評価結果の概要を表示
pub fn print_summary(evaluation: &Evaluation, rank: u8) {
    println!("  評価対象: {}件（{}位の候補、ベンチマーク外 {}件を除外）",
        evaluation.scored, rank, evaluation.excluded);
    println!("  再現率の分母: {}", evaluation.recall_total);

    if evaluation.scored == 0 {
        tracing::warn!("ベンチマークと一致する見出し語がありません");
    }

    match evaluation.best() {
        Some(best) => println!(
            "  最良F値: {:.4} (閾値 {:.2}, 適合率 {}, 再現率 {:.4}, right {} / wrong {} / missing {})",
            best.f_measure.unwrap_or_default(),
            best.cutoff,
            best.precision.map(|p| format!("{:.4}", p)).unwrap_or_else(|| "-".into()),
            best.recall,
            best.right,
            best.wrong,
            best.missing,
        ),
        None => println!("  F値を計算できる閾値がありません"),
    }
}

/// 出力先ディレクトリ（引数 → 設定）
pub fn output_dir_or(arg: Option<PathBuf>, configured: &Path) -> PathBuf {
    arg.unwrap_or_else(|| configured.to_path_buf())
}
