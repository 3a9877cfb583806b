//! マニフェスト（ベンチマークキャッシュ）テスト

use lexbench::builder::{BenchmarkManifest, ManifestSource};
use lexbench_common::{MergeReport, Orthography, SourceKind};
use tempfile::tempdir;

fn sample_manifest(csv: &[u8]) -> BenchmarkManifest {
    BenchmarkManifest::new(
        Orthography::Nfkc,
        vec![ManifestSource {
            location: "bench.tsv".to_string(),
            kind: SourceKind::Benchmark,
            priority: 0,
            rows: 2,
        }],
        2,
        1,
        MergeReport { input_rows: 2, ..Default::default() },
        csv,
    )
}

/// マニフェストがなければ None
#[test]
fn test_manifest_missing() {
    let dir = tempdir().expect("Failed to create temp dir");
    assert!(BenchmarkManifest::load(&dir.path().join("benchmark.csv")).is_none());
}

/// 保存と読み込み
#[test]
fn test_manifest_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let benchmark = dir.path().join("benchmark.csv");
    let csv = b"greek,latin,valid\n";

    let manifest = sample_manifest(csv);
    manifest.save(&benchmark).expect("マニフェスト保存失敗");

    let loaded = BenchmarkManifest::load(&benchmark).expect("マニフェストが見つからない");
    assert_eq!(loaded, manifest);
    assert!(loaded.matches(csv));
}

/// 破損したマニフェストは無視
#[test]
fn test_manifest_corrupted() {
    let dir = tempdir().expect("Failed to create temp dir");
    let benchmark = dir.path().join("benchmark.csv");
    std::fs::write(BenchmarkManifest::path_for(&benchmark), "{ invalid json }").unwrap();

    assert!(BenchmarkManifest::load(&benchmark).is_none());
}

/// ベンチマークとマニフェストの削除
#[test]
fn test_manifest_clear() {
    let dir = tempdir().expect("Failed to create temp dir");
    let benchmark = dir.path().join("benchmark.csv");
    let csv = b"greek,latin,valid\n";
    std::fs::write(&benchmark, csv).unwrap();
    sample_manifest(csv).save(&benchmark).unwrap();

    assert!(BenchmarkManifest::clear(&benchmark).unwrap());
    assert!(!benchmark.exists());
    assert!(!BenchmarkManifest::path_for(&benchmark).exists());

    // 2回目は何もない
    assert!(!BenchmarkManifest::clear(&benchmark).unwrap());
}
