//! テキスト正規化
//!
//! 絵文字と前後の空白を除去し、空文字列・"nan" を「テキストなし」として扱う。

/// 除去対象の絵文字コードポイント範囲
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // symbols & pictographs
    (0x1F680, 0x1F6FF), // transport & map symbols
    (0x1F1E0, 0x1F1FF), // flags
    (0x1F900, 0x1F9FF), // supplemental symbols & pictographs
    (0x2702, 0x27B0),   // dingbats
    (0x2600, 0x26FF),   // misc symbols
    (0x24C2, 0x24C2),   // Ⓜ
    (0x1F170, 0x1F251), // enclosed alphanumerics / ideographs
    (0xFE0F, 0xFE0F),   // variation selector-16
    (0x200D, 0x200D),   // zero width joiner
];

/// 欠損値として扱うプレースホルダ
const MISSING_MARKER: &str = "nan";

fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

/// 絵文字を除去し前後の空白をトリムする
pub fn strip_emoji(text: &str) -> String {
    text.chars().filter(|&c| !is_emoji(c)).collect::<String>().trim().to_string()
}

/// 照合用に正規化する
///
/// 正規化後が空文字列または "nan" の場合は `None`（テキストなし）
pub fn normalize_text(text: &str) -> Option<String> {
    let cleaned = strip_emoji(text);
    if is_missing(&cleaned) {
        None
    } else {
        Some(cleaned)
    }
}

/// 空文字列・"nan" 判定（前後空白は無視）
pub fn is_missing(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == MISSING_MARKER
}
