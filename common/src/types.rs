//! 共通型定義

use serde::{Deserialize, Serialize};

/// 文字起こしから回答と判定した場合の回答方法
pub const METHOD_PERFORMER: &str = "出演者";

/// 人間判定CSVで回答方法が空欄だった場合の回答方法
pub const METHOD_OPERATOR: &str = "運営コメント";

/// 文字起こしの1発言（タイムコード・話者・発言内容）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utterance {
    pub start_time: String,       // 開始タイムコード HH:MM:SS:FF
    pub end_time: String,         // 終了タイムコード
    pub speaker: String,          // 話者名（例: 話者 1）
    pub text: String,             // 発言内容（複数行は改行で連結）
}

impl Utterance {
    /// 開始時刻（秒）
    pub fn start_seconds(&self) -> u64 {
        timecode_to_seconds(&self.start_time)
    }

    /// 終了時刻（秒）
    pub fn end_seconds(&self) -> u64 {
        timecode_to_seconds(&self.end_time)
    }
}

/// タイムコード（HH:MM:SS:FF）を秒に変換
///
/// フレームは30fpsとして換算し、端数は切り捨てる。
/// `HH:MM:SS` 形式も受け付け、それ以外は0を返す。
pub fn timecode_to_seconds(timecode: &str) -> u64 {
    let parts: Option<Vec<u64>> = timecode
        .trim()
        .split(':')
        .map(|p| p.parse::<u64>().ok())
        .collect();

    match parts.as_deref() {
        Some([h, m, s, f]) => h * 3600 + m * 60 + s + f / 30,
        Some([h, m, s]) => h * 3600 + m * 60 + s,
        _ => 0,
    }
}

/// 質問ごとの照合結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub answered: bool,           // 回答状況
    pub method: String,           // 回答方法（未回答なら空）
}

impl MatchResult {
    pub fn answered_by(method: impl Into<String>) -> Self {
        Self {
            answered: true,
            method: method.into(),
        }
    }
}
