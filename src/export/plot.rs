//! 適合率・再現率の曲線をSVGで描画

use crate::error::{LexBenchError, Result};
use lexbench_common::EvaluationRow;
use plotters::prelude::*;
use std::path::Path;

/// 画像サイズ（px）
pub const PLOT_WIDTH: u32 = 800;
pub const PLOT_HEIGHT: u32 = 500;

/// 描画する指標
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Precision,
    Recall,
}

impl Metric {
    pub fn value(&self, row: &EvaluationRow) -> Option<f64> {
        match self {
            Metric::Precision => row.precision,
            Metric::Recall => Some(row.recall),
        }
    }

    /// 出力ファイル名
    pub fn file_name(&self) -> &'static str {
        match self {
            Metric::Precision => "precision.svg",
            Metric::Recall => "recall.svg",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Metric::Precision => "precision",
            Metric::Recall => "recall",
        }
    }
}

fn plot_err<E: std::fmt::Display>(e: E) -> LexBenchError {
    LexBenchError::Export(format!("グラフ描画エラー: {}", e))
}

/// 閾値に対する指標の折れ線グラフを描画
///
/// 値が未定義の閾値（採用候補なしの適合率）は点を打たない。
pub fn render_curve(rows: &[EvaluationRow], metric: Metric, path: &Path) -> Result<()> {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .filter_map(|r| metric.value(r).map(|v| (r.cutoff, v)))
        .collect();

    let x_min = rows.first().map(|r| r.cutoff).unwrap_or(0.0);
    let mut x_max = rows.last().map(|r| r.cutoff).unwrap_or(1.0);
    if x_max <= x_min {
        x_max = x_min + 0.01;
    }

    let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} by similarity cutoff", metric.label()), ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0f64..1f64)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("cutoff")
        .y_desc(metric.label())
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
