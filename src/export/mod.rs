pub mod plot;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use lexbench_common::{Evaluation, EvaluationRow};
use plot::Metric;
use std::path::{Path, PathBuf};

pub const CSV_FILE_NAME: &str = "evaluation.csv";
pub const EXCEL_FILE_NAME: &str = "evaluation.xlsx";

/// 評価結果をCSVに書き出す（未定義の値は空欄）
pub fn generate_csv(rows: &[EvaluationRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 評価結果を出力する
///
/// 適合率・再現率のグラフは常に出力し、形式に応じて表も出力する。
/// 書き出したファイルのパスを返す。
pub fn export_evaluation(
    evaluation: &Evaluation,
    format: &ExportFormat,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let mut written = Vec::new();

    for metric in [Metric::Precision, Metric::Recall] {
        let path = output_dir.join(metric.file_name());
        plot::render_curve(&evaluation.rows, metric, &path)?;
        println!("✔ グラフ出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, ExportFormat::Csv | ExportFormat::All) {
        let path = output_dir.join(CSV_FILE_NAME);
        generate_csv(&evaluation.rows, &path)?;
        println!("✔ CSV出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::All) {
        let path = output_dir.join(EXCEL_FILE_NAME);
        excel::generate_excel(&evaluation.rows, &path)?;
        println!("✔ Excel出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
