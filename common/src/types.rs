//! データ型定義
//!
//! CLIと評価コアで共有される型:
//! - WordPairJudgment: 人手による訳語判定（ベンチマーク入力）
//! - CandidateTranslation: 類似度スコア付き訳語候補
//! - EvaluationRow: 閾値ごとの評価結果

use serde::{Deserialize, Serialize};

/// 言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Greek,
    Latin,
}

/// 訳語ペアの判定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPairJudgment {
    pub greek: String,
    pub latin: String,
    /// None = 未判定
    #[serde(default)]
    pub valid: Option<bool>,
}

impl WordPairJudgment {
    pub fn new(greek: impl Into<String>, latin: impl Into<String>, valid: Option<bool>) -> Self {
        Self {
            greek: greek.into(),
            latin: latin.into(),
            valid,
        }
    }

    /// 判定済みか
    pub fn is_judged(&self) -> bool {
        self.valid.is_some()
    }
}

/// 訳語候補（類似度順位付き）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTranslation {
    pub greek: String,
    pub latin: String,
    pub score: f64,
    /// 1始まりの順位
    pub rank: u8,
}

/// 閾値ごとの評価結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRow {
    pub cutoff: f64,
    pub right: usize,
    pub wrong: usize,
    pub missing: usize,
    /// right + wrong が0のときは未定義
    pub precision: Option<f64>,
    pub recall: f64,
    pub f_measure: Option<f64>,
}

impl EvaluationRow {
    /// 閾値以上で採用された候補数
    pub fn retained(&self) -> usize {
        self.right + self.wrong + self.missing
    }
}

/// 候補の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// ベンチマークで正解
    Right,
    /// ベンチマークで不正解
    Wrong,
    /// ベンチマークに判定なし
    Missing,
}
