//! 評価テスト
//!
//! ベンチマークCSVと候補ファイルを読み込んで閾値を走査する

use lexbench::scanner;
use lexbench_common::{
    evaluate, BenchmarkTable, EvaluationOptions, EvaluationRow, RecallTotal,
};
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const BENCHMARK: &str = "greek,latin,valid\n\
λόγος,ratio,1\n\
λόγος,sermo,0\n\
ἀνήρ,vir,1\n\
θεός,deus,1\n\
θεός,divus,0\n\
ψυχή,anima,1\n";

const CANDIDATES: &str = "λόγος,ratio:0.81,verbum:0.77,oratio:0.65\n\
ἀνήρ,homo:0.62,vir:0.60\n\
θεός,divus:0.45,deus:0.40\n\
ψυχή,spiritus:0.30\n\
ὕδωρ,aqua:0.99\n";

fn fixture() -> (TempDir, BenchmarkTable, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let bench = dir.path().join("benchmark.csv");
    std::fs::write(&bench, BENCHMARK).unwrap();
    let cands = dir.path().join("trans.csv");
    std::fs::write(&cands, CANDIDATES).unwrap();

    let table = BenchmarkTable::load(&bench).unwrap();
    (dir, table, cands)
}

fn row_at(rows: &[EvaluationRow], cutoff: f64) -> &EvaluationRow {
    rows.iter()
        .find(|r| (r.cutoff - cutoff).abs() < 1e-9)
        .expect("閾値が見つからない")
}

/// 1語だけの最小例
#[test]
fn test_single_word_example() {
    let dir = tempdir().unwrap();
    let cands = dir.path().join("trans.csv");
    std::fs::write(&cands, "λόγος,ratio:0.8\n").unwrap();

    let mut table = BenchmarkTable::new();
    table.insert("λόγος", "ratio", true);
    table.insert("λόγος", "verbum", false);

    let candidates = scanner::load_candidates(&[cands], Default::default()).unwrap();
    let evaluation = evaluate(&table, &candidates, &EvaluationOptions::default()).unwrap();

    let row = row_at(&evaluation.rows, 0.5);
    assert_eq!((row.right, row.wrong, row.missing), (1, 0, 0));
    assert_eq!(row.precision, Some(1.0));
    assert_eq!(row.recall, 1.0);

    let row = row_at(&evaluation.rows, 0.85);
    assert_eq!(row.retained(), 0);
    assert_eq!(row.precision, None);
}

/// 既定の走査は 0.10〜0.90 の81点
#[test]
fn test_default_sweep() {
    let (_dir, table, cands) = fixture();
    let candidates = scanner::load_candidates(&[cands], Default::default()).unwrap();
    let evaluation = evaluate(&table, &candidates, &EvaluationOptions::default()).unwrap();

    assert_eq!(evaluation.rows.len(), 81);
    assert!((evaluation.rows[0].cutoff - 0.10).abs() < 1e-9);
    assert!((evaluation.rows[80].cutoff - 0.90).abs() < 1e-9);
}

/// ベンチマークにない見出し語は除外
#[test]
fn test_join_excludes_unknown_headwords() {
    let (_dir, table, cands) = fixture();
    let candidates = scanner::load_candidates(&[cands], Default::default()).unwrap();
    let evaluation = evaluate(&table, &candidates, &EvaluationOptions::default()).unwrap();

    // ὕδωρ は除外
    assert_eq!(evaluation.scored, 4);
    assert_eq!(evaluation.excluded, 1);

    let row = row_at(&evaluation.rows, 0.10);
    assert_eq!(row.retained(), 4);
    // ratio=right, homo=missing, divus=wrong, spiritus=missing
    assert_eq!((row.right, row.wrong, row.missing), (1, 1, 2));
}

/// 再現率の分母は結合後の見出し語の正解数
#[test]
fn test_computed_recall_total() {
    let (_dir, table, cands) = fixture();
    let candidates = scanner::load_candidates(&[cands], Default::default()).unwrap();
    let evaluation = evaluate(&table, &candidates, &EvaluationOptions::default()).unwrap();

    assert_eq!(evaluation.recall_total, 4);
    for row in &evaluation.rows {
        assert!(row.recall <= 1.0);
    }
}

/// 固定の分母を指定
#[test]
fn test_fixed_recall_total() {
    let (_dir, table, cands) = fixture();
    let candidates = scanner::load_candidates(&[cands], Default::default()).unwrap();
    let options = EvaluationOptions {
        recall_total: RecallTotal::Fixed(375),
        ..Default::default()
    };
    let evaluation = evaluate(&table, &candidates, &options).unwrap();

    assert_eq!(evaluation.recall_total, 375);
    let row = row_at(&evaluation.rows, 0.10);
    assert!((row.recall - 1.0 / 375.0).abs() < 1e-12);
}

/// 閾値を上げると採用数・正解数・再現率は増えない
#[test]
fn test_monotonic_in_cutoff() {
    let (_dir, table, cands) = fixture();
    let candidates = scanner::load_candidates(&[cands], Default::default()).unwrap();
    let evaluation = evaluate(&table, &candidates, &EvaluationOptions::default()).unwrap();

    for pair in evaluation.rows.windows(2) {
        assert!(pair[0].cutoff < pair[1].cutoff);
        assert!(pair[0].retained() >= pair[1].retained());
        assert!(pair[0].right >= pair[1].right);
        assert!(pair[0].recall >= pair[1].recall);
    }

    for row in &evaluation.rows {
        if let Some(p) = row.precision {
            assert!((0.0..=1.0).contains(&p));
        }
        if let Some(f) = row.f_measure {
            assert!((0.0..=1.0).contains(&f));
        }
    }
}

/// 2位の候補を評価
#[test]
fn test_rank_two() {
    let (_dir, table, cands) = fixture();
    let candidates = scanner::load_candidates(&[cands], Default::default()).unwrap();
    let options = EvaluationOptions { rank: 2, ..Default::default() };
    let evaluation = evaluate(&table, &candidates, &options).unwrap();

    // verbum(λόγος)=missing, vir(ἀνήρ)=right, deus(θεός)=right
    assert_eq!(evaluation.scored, 3);
    let row = row_at(&evaluation.rows, 0.10);
    assert_eq!((row.right, row.wrong, row.missing), (2, 0, 1));
}

/// ディレクトリ内の分割ファイルを連結して評価
#[test]
fn test_split_candidate_files() {
    let (dir, table, _) = fixture();
    let split = dir.path().join("split");
    std::fs::create_dir(&split).unwrap();
    std::fs::write(split.join("trans.0.csv"), "λόγος,ratio:0.81\n").unwrap();
    std::fs::write(split.join("trans.1.csv"), "ἀνήρ,vir:0.60\n").unwrap();

    let files = scanner::collect_candidate_files(&split).unwrap();
    assert_eq!(files.len(), 2);

    let candidates = scanner::load_candidates(&files, Default::default()).unwrap();
    let evaluation = evaluate(&table, &candidates, &EvaluationOptions::default()).unwrap();

    let row = row_at(&evaluation.rows, 0.5);
    assert_eq!((row.right, row.wrong, row.missing), (2, 0, 0));
}
