//! 訳語候補ファイルのパーサー
//!
//! 類似度計算スクリプトの出力形式:
//! ```text
//! λόγος,ratio:0.81,verbum:0.77,oratio:0.65
//! ἀνήρ,vir:0.92
//! ```
//! ヘッダなし。1列目が見出し語、以降が最大3つの `latin:score`（スコア降順）。

use crate::error::{Error, Result};
use crate::normalize::Orthography;
use crate::types::{CandidateTranslation, Lang};
use std::io::Read;

/// 1行あたりの最大候補数
pub const MAX_RANK: usize = 3;

/// `latin:score` を分解（最後の `:` で区切る）
pub fn parse_compound(field: &str) -> std::result::Result<(&str, f64), String> {
    let (latin, score) = field
        .rsplit_once(':')
        .ok_or_else(|| format!("`latin:score` 形式ではありません: {:?}", field))?;

    let score: f64 = score
        .trim()
        .parse()
        .map_err(|_| format!("スコアを解釈できません: {:?}", score))?;

    if !score.is_finite() {
        return Err(format!("スコアが有限値ではありません: {}", score));
    }

    Ok((latin.trim(), score))
}

/// 候補ファイルを読み込む
///
/// 列数が 1〜4 でない行、`latin:score` として解釈できない列はエラー。
/// 空行は読み飛ばす。
pub fn parse_candidates<R: Read>(
    reader: R,
    orthography: Orthography,
) -> Result<Vec<CandidateTranslation>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut candidates = Vec::new();

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        if record.len() > MAX_RANK + 1 {
            return Err(Error::Parse(format!(
                "{}行目: 列数が不正です（{}列、最大{}列）",
                line,
                record.len(),
                MAX_RANK + 1
            )));
        }

        let greek = orthography.apply(Lang::Greek, &record[0]);
        if greek.is_empty() {
            return Err(Error::Parse(format!("{}行目: 見出し語が空です", line)));
        }

        for (pos, field) in record.iter().skip(1).enumerate() {
            if field.trim().is_empty() {
                continue;
            }

            let (latin, score) = parse_compound(field)
                .map_err(|e| Error::Parse(format!("{}行目 {}列: {}", line, pos + 2, e)))?;

            candidates.push(CandidateTranslation {
                greek: greek.clone(),
                latin: orthography.apply(Lang::Latin, latin),
                score,
                rank: (pos + 1) as u8,
            });
        }
    }

    Ok(candidates)
}
