//! 訳語候補ファイルの指定
//!
//! 引数 → 設定ファイルの順に探し、どちらにもなく端末から実行されている
//! 場合だけ対話的に入力を求める。非対話実行では `MissingCandidates`。

use crate::error::{LexBenchError, Result};
use dialoguer::Input;
use std::io::IsTerminal;
use std::path::PathBuf;

/// 候補ファイルのパスを決定
pub fn resolve_candidates_path(
    arg: Option<PathBuf>,
    configured: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = arg.or(configured) {
        return Ok(path);
    }

    if !std::io::stdin().is_terminal() {
        return Err(LexBenchError::MissingCandidates);
    }

    prompt_candidates_path()
}

/// パス入力プロンプト
fn prompt_candidates_path() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("訳語候補ファイル（またはディレクトリ）")
        .validate_with(|s: &String| -> std::result::Result<(), String> {
            let path = PathBuf::from(s.trim());
            if path.exists() {
                Ok(())
            } else {
                Err(format!("見つかりません: {}", path.display()))
            }
        })
        .interact_text()
        .map_err(|e| LexBenchError::Config(e.to_string()))?;

    Ok(PathBuf::from(input.trim()))
}
