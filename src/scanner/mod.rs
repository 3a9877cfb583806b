//! 訳語候補ファイルの収集
//!
//! 類似度計算は子プロセスに分割して実行し、出力を連結することがある。
//! ディレクトリを指定した場合は直下の候補ファイルをすべて読み込んで連結する。

use crate::error::{LexBenchError, Result};
use lexbench_common::{is_greek, parse_candidates, CandidateTranslation, Orthography};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const CANDIDATE_EXTENSIONS: &[&str] = &["csv", "txt"];

/// 候補ファイルの一覧（ファイル名順）
pub fn collect_candidate_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(LexBenchError::FileNotFound(path.display().to_string()));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .max_depth(1)  // 直下のみ
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .map(|ext| is_candidate_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    if files.is_empty() {
        return Err(LexBenchError::NoCandidateFiles(path.display().to_string()));
    }

    files.sort();
    Ok(files)
}

fn is_candidate_extension(ext: &str) -> bool {
    CANDIDATE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

/// 候補ファイルを読み込んで連結
pub fn load_candidates(
    paths: &[PathBuf],
    orthography: Orthography,
) -> Result<Vec<CandidateTranslation>> {
    let mut all = Vec::new();

    for path in paths {
        let file = File::open(path)?;
        let candidates = parse_candidates(BufReader::new(file), orthography)
            .map_err(|e| LexBenchError::Parse(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), candidates = candidates.len(), "候補を読み込みました");
        all.extend(candidates);
    }

    {
        let non_greek = non_greek_headwords(&all);
        if !non_greek.is_empty() {
            tracing::warn!(
                count = non_greek.len(),
                first = non_greek.iter().next().copied().unwrap_or_default(),
                "ギリシア文字を含まない見出し語があります"
            );
        }
    }

    Ok(all)
}

/// ギリシア文字を含まない見出し語
pub fn non_greek_headwords(candidates: &[CandidateTranslation]) -> BTreeSet<&str> {
    candidates
        .iter()
        .map(|c| c.greek.as_str())
        .filter(|g| !is_greek(g))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_candidate_extension() {
        assert!(is_candidate_extension("csv"));
        assert!(is_candidate_extension("CSV"));
        assert!(is_candidate_extension("txt"));
        assert!(!is_candidate_extension("json"));
    }

    #[test]
    fn test_collect_not_found() {
        let result = collect_candidate_files(Path::new("/nonexistent/trans.csv"));
        assert!(matches!(result, Err(LexBenchError::FileNotFound(_))));
    }

    #[test]
    fn test_collect_directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("trans.2.csv"), "ἀνήρ,vir:0.9\n").unwrap();
        fs::write(dir.path().join("trans.1.csv"), "λόγος,ratio:0.8\n").unwrap();
        fs::write(dir.path().join("notes.md"), "memo").unwrap();

        let files = collect_candidate_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("trans.1.csv"));

        let candidates = load_candidates(&files, Orthography::Nfkc).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].greek, "λόγος");
    }

    #[test]
    fn test_non_greek_headwords() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trans.csv");
        fs::write(&path, "λόγος,ratio:0.8\nlogos,ratio:0.7,verbum:0.6\n").unwrap();

        let candidates = load_candidates(&[path], Orthography::Nfkc).unwrap();
        assert_eq!(candidates.len(), 3);
        let words: Vec<&str> = non_greek_headwords(&candidates).into_iter().collect();
        assert_eq!(words, vec!["logos"]);
    }

    #[test]
    fn test_collect_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_candidate_files(dir.path());
        assert!(matches!(result, Err(LexBenchError::NoCandidateFiles(_))));
    }
}
