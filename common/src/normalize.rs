//! 文字列正規化
//!
//! 多調ギリシア文字や補助記号付きラテン文字は、見た目が同じでも
//! 合成済み文字と結合文字列の違いでバイト列が一致しない。
//! 比較・保存の前に必ず NFKC を通す。

use crate::betacode::{beta_to_unicode, looks_like_betacode};
use crate::types::Lang;
use serde::{Deserialize, Serialize};
use unicode_normalization::{is_nfkc_quick, IsNormalized, UnicodeNormalization};

/// NFKC 正規化（前後の空白を除去）
pub fn nfkc(s: &str) -> String {
    s.trim().nfkc().collect()
}

/// 既に NFKC 正規化済みか
pub fn is_nfkc(s: &str) -> bool {
    match is_nfkc_quick(s.chars()) {
        IsNormalized::Yes => true,
        IsNormalized::No => false,
        IsNormalized::Maybe => s.nfkc().eq(s.chars()),
    }
}

/// ギリシア語らしい語か（U+00FF を超える文字を含む）
pub fn is_greek(s: &str) -> bool {
    s.chars().any(|c| c as u32 > 0xFF)
}

/// 表記の統一方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orthography {
    /// NFKC のみ
    #[default]
    Nfkc,
    /// Tesserae 方式: j→i, v→u, Beta Code変換, 小文字化 + NFKC
    Tesserae,
}

impl Orthography {
    /// 語を正規化する
    pub fn apply(&self, lang: Lang, word: &str) -> String {
        match self {
            Orthography::Nfkc => nfkc(word),
            Orthography::Tesserae => nfkc(&standardize(lang, word.trim())),
        }
    }
}

impl std::str::FromStr for Orthography {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nfkc" => Ok(Orthography::Nfkc),
            "tesserae" | "tess" => Ok(Orthography::Tesserae),
            _ => Err(format!("Unknown orthography: {}. Use nfkc or tesserae", s)),
        }
    }
}

impl std::fmt::Display for Orthography {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orthography::Nfkc => write!(f, "nfkc"),
            Orthography::Tesserae => write!(f, "tesserae"),
        }
    }
}

/// Tesserae の表記統一
fn standardize(lang: Lang, word: &str) -> String {
    match lang {
        Lang::Latin => word.to_lowercase().replace('j', "i").replace('v', "u"),
        Lang::Greek => {
            let unicode = if looks_like_betacode(word) {
                // 重アクセントは鋭アクセントに寄せる
                beta_to_unicode(&word.replace('\\', "/"))
            } else {
                word.to_string()
            };
            unicode.to_lowercase()
        }
    }
}
