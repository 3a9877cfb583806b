//! Beta Code → Unicode 変換
//!
//! Perseus の辞書データ（LSJ 等）はギリシア語を ASCII の Beta Code で
//! 記述している。ここでは多調ギリシア文字（結合文字付き）に変換する。
//! 結果は NFKC 前の分解形なので、比較に使う場合は `normalize::nfkc` を通すこと。

/// 気息・アクセント記号 → 結合文字
fn diacritic(c: char) -> Option<char> {
    match c {
        ')' => Some('\u{0313}'),  // 無気息記号
        '(' => Some('\u{0314}'),  // 有気息記号
        '/' => Some('\u{0301}'),  // 鋭アクセント
        '=' => Some('\u{0342}'),  // 曲アクセント
        '\\' => Some('\u{0300}'), // 重アクセント
        '+' => Some('\u{0308}'),  // 分音記号
        '|' => Some('\u{0345}'),  // 下書きイオタ
        _ => None,
    }
}

/// ラテン文字 → ギリシア小文字
fn letter(c: char) -> Option<char> {
    let greek = match c.to_ascii_lowercase() {
        'a' => 'α',
        'b' => 'β',
        'g' => 'γ',
        'd' => 'δ',
        'e' => 'ε',
        'z' => 'ζ',
        'h' => 'η',
        'q' => 'θ',
        'i' => 'ι',
        'k' => 'κ',
        'l' => 'λ',
        'm' => 'μ',
        'n' => 'ν',
        'c' => 'ξ',
        'o' => 'ο',
        'p' => 'π',
        'r' => 'ρ',
        's' => 'σ',
        't' => 'τ',
        'u' => 'υ',
        'f' => 'φ',
        'x' => 'χ',
        'y' => 'ψ',
        'w' => 'ω',
        _ => return None,
    };
    Some(greek)
}

/// ASCIIのみで、英字を1文字以上含む
pub fn looks_like_betacode(s: &str) -> bool {
    s.is_ascii() && s.chars().any(|c| c.is_ascii_alphabetic())
}

/// Beta Code 文字列を Unicode ギリシア文字に変換
///
/// 大文字は `*` を前置し、大文字に付く記号は `*` と文字の間に置かれる
/// （例: `*)a` → Ἀ）。出力では記号を文字の後ろへ並べ替える。
/// 語末の `s` は終止形シグマ `ς` になる。
///
/// # Examples
/// ```
/// use lexbench_common::betacode::beta_to_unicode;
/// use lexbench_common::normalize::nfkc;
///
/// assert_eq!(nfkc(&beta_to_unicode("lo/gos")), nfkc("λόγος"));
/// ```
pub fn beta_to_unicode(beta: &str) -> String {
    let chars: Vec<char> = beta.chars().collect();
    let mut out = String::with_capacity(beta.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '*' {
            // 大文字: 直後の記号をバッファして文字の後に出力
            let mut marks = Vec::new();
            let mut j = i + 1;
            while j < chars.len() {
                match diacritic(chars[j]) {
                    Some(m) => marks.push(m),
                    None => break,
                }
                j += 1;
            }

            match chars.get(j).and_then(|&l| letter(l)) {
                Some(g) => {
                    out.extend(g.to_uppercase());
                    out.extend(marks);
                    i = j + 1;
                }
                None => {
                    // 文字が続かない `*` はそのまま残す
                    out.push('*');
                    i += 1;
                }
            }
            continue;
        }

        if let Some(m) = diacritic(c) {
            out.push(m);
        } else if let Some(g) = letter(c) {
            if g == 'σ' && is_word_end(&chars, i + 1) {
                out.push('ς');
            } else {
                out.push(g);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

/// 位置 `next` 以降に同じ語の文字が続かないか
fn is_word_end(chars: &[char], next: usize) -> bool {
    match chars.get(next) {
        None => true,
        Some(&c) => !(c.is_ascii_alphabetic() || diacritic(c).is_some() || c == '*'),
    }
}
