//! 適合率・再現率の評価
//!
//! ## 処理フロー
//! 1. 指定順位（既定は1位）の候補のみ抽出
//! 2. ベンチマークに見出し語がある候補に限定（greek で内部結合）
//! 3. 閾値を範囲内で走査し、閾値以上の候補を right / wrong / missing に分類
//! 4. 適合率・再現率・重み付きF値を算出

use crate::benchmark::BenchmarkTable;
use crate::error::{Error, Result};
use crate::types::{CandidateTranslation, EvaluationRow, Outcome};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 走査する閾値の上限数
pub const MAX_CUTOFFS: usize = 1_000_000;

/// 閾値の走査範囲（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutoffRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for CutoffRange {
    fn default() -> Self {
        Self {
            start: 0.10,
            end: 0.90,
            step: 0.01,
        }
    }
}

impl CutoffRange {
    pub fn validate(&self) -> Result<()> {
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            return Err(Error::Config("閾値範囲に有限でない値があります".into()));
        }
        if self.start <= 0.0 {
            return Err(Error::Config(format!("start は正の値にしてください: {}", self.start)));
        }
        if self.start > self.end {
            return Err(Error::Config(format!(
                "start ({}) が end ({}) を超えています",
                self.start, self.end
            )));
        }
        if self.step <= 0.0 {
            return Err(Error::Config(format!("step は正の値にしてください: {}", self.step)));
        }
        let points = (self.end - self.start) / self.step + 1.0;
        if points > MAX_CUTOFFS as f64 {
            return Err(Error::Config(format!(
                "閾値の数が多すぎます（step {}、上限 {}点）",
                self.step, MAX_CUTOFFS
            )));
        }
        Ok(())
    }

    /// 閾値の列（整数ステップで生成し浮動小数誤差を丸める）
    pub fn cutoffs(&self) -> Vec<f64> {
        let steps = ((self.end - self.start) / self.step + 1e-9).floor() as usize;
        (0..=steps)
            .map(|i| round9(self.start + self.step * i as f64))
            .collect()
    }
}

fn round9(x: f64) -> f64 {
    (x * 1e9).round() / 1e9
}

/// 再現率の分母
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "value")]
pub enum RecallTotal {
    /// 結合後の見出し語に属する正解ペア数
    #[default]
    Computed,
    /// 固定値
    Fixed(usize),
}

/// 評価オプション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOptions {
    pub range: CutoffRange,
    /// F値の重み β²（大きいほど再現率を重視）
    pub beta_squared: f64,
    /// 評価する候補の順位
    pub rank: u8,
    pub recall_total: RecallTotal,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            range: CutoffRange::default(),
            beta_squared: 36.0,
            rank: 1,
            recall_total: RecallTotal::Computed,
        }
    }
}

/// 評価結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 閾値昇順
    pub rows: Vec<EvaluationRow>,
    /// 再現率の分母
    pub recall_total: usize,
    /// 結合後の評価対象候補数
    pub scored: usize,
    /// 結合で除外された候補数
    pub excluded: usize,
}

impl Evaluation {
    /// F値が最大の行
    pub fn best(&self) -> Option<&EvaluationRow> {
        self.rows
            .iter()
            .filter_map(|r| r.f_measure.map(|f| (r, f)))
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(r, _)| r)
    }
}

/// 指定順位の候補のうち、ベンチマークに見出し語があるものだけを残す
///
/// 同じ見出し語が複数回現れた場合（分割実行の出力を連結した場合など）は
/// 最初のものを採用する。
pub fn join<'a>(
    benchmark: &BenchmarkTable,
    candidates: &'a [CandidateTranslation],
    rank: u8,
) -> Vec<&'a CandidateTranslation> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|c| c.rank == rank)
        .filter(|c| benchmark.contains_greek(&c.greek))
        .filter(|c| seen.insert(c.greek.as_str()))
        .collect()
}

/// 候補1件の判定
pub fn classify(benchmark: &BenchmarkTable, candidate: &CandidateTranslation) -> Outcome {
    match benchmark.judgment(&candidate.greek, &candidate.latin) {
        Some(true) => Outcome::Right,
        Some(false) => Outcome::Wrong,
        None => Outcome::Missing,
    }
}

/// 重み付きF値 F_β = (1+β²)PR / (β²P + R)
pub fn f_measure(precision: f64, recall: f64, beta_squared: f64) -> Option<f64> {
    let denom = beta_squared * precision + recall;
    if denom <= 0.0 {
        return None;
    }
    Some((1.0 + beta_squared) * precision * recall / denom)
}

/// 1つの閾値について集計
pub fn score_cutoff(
    scored: &[(f64, Outcome)],
    cutoff: f64,
    recall_total: usize,
    beta_squared: f64,
) -> EvaluationRow {
    let mut right = 0;
    let mut missing = 0;
    let mut retained = 0;

    for &(score, outcome) in scored {
        if score < cutoff {
            continue;
        }
        retained += 1;
        match outcome {
            Outcome::Right => right += 1,
            Outcome::Missing => missing += 1,
            Outcome::Wrong => {}
        }
    }

    let wrong = retained - right - missing;

    let precision = if right + wrong > 0 {
        Some(right as f64 / (right + wrong) as f64)
    } else {
        None
    };
    let recall = if recall_total > 0 {
        right as f64 / recall_total as f64
    } else {
        0.0
    };
    let f = precision.and_then(|p| f_measure(p, recall, beta_squared));

    EvaluationRow {
        cutoff,
        right,
        wrong,
        missing,
        precision,
        recall,
        f_measure: f,
    }
}

/// 閾値を走査して評価する
pub fn evaluate(
    benchmark: &BenchmarkTable,
    candidates: &[CandidateTranslation],
    options: &EvaluationOptions,
) -> Result<Evaluation> {
    options.range.validate()?;
    if options.rank == 0 {
        return Err(Error::Config("rank は1以上にしてください".into()));
    }
    if !(options.beta_squared.is_finite() && options.beta_squared >= 0.0) {
        return Err(Error::Config(format!(
            "beta_squared が不正です: {}",
            options.beta_squared
        )));
    }

    let joined = join(benchmark, candidates, options.rank);
    let ranked = candidates.iter().filter(|c| c.rank == options.rank).count();

    let recall_total = match options.recall_total {
        RecallTotal::Fixed(n) => n,
        RecallTotal::Computed => {
            benchmark.valid_count_for(joined.iter().map(|c| c.greek.as_str()))
        }
    };

    let scored: Vec<(f64, Outcome)> = joined
        .iter()
        .map(|c| (c.score, classify(benchmark, c)))
        .collect();

    let rows: Vec<EvaluationRow> = options
        .range
        .cutoffs()
        .into_par_iter()
        .map(|cutoff| score_cutoff(&scored, cutoff, recall_total, options.beta_squared))
        .collect();

    Ok(Evaluation {
        rows,
        recall_total,
        scored: joined.len(),
        excluded: ranked - joined.len(),
    })
}
