//! 文字起こしテキストパーサー
//!
//! 行単位の状態機械で「タイムコード行 → 話者行 → 発言行…」のブロックを抽出する。
//!
//! ```text
//! 00:00:00:01 - 00:00:11:22
//! 話者 1
//! 今日は晴れです
//!
//! 00:00:12:00 - 00:00:20:05
//! 話者 2
//! ...
//! ```
//!
//! 不完全なブロックや予期しない行はエラーにせず、件数を数えて読み飛ばす。

use crate::error::Result;
use crate::types::Utterance;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// 予期しない行の警告を出す上限
const INVALID_LINE_WARN_LIMIT: usize = 10;

/// デバッグ出力するサンプル件数
const SAMPLE_COUNT: usize = 3;

lazy_static::lazy_static! {
    // 00:00:00:01 - 00:00:11:22（ダッシュ必須。終了側が欠けた行もブロック開始として扱う）
    static ref TIMECODE_RE: Regex = Regex::new(
        r"^(\d{2}:\d{2}:\d{2}:\d{2})\s*-\s*(\d{2}:\d{2}:\d{2}:\d{2})?"
    ).unwrap();
    // 話者 1 / Speaker 2
    static ref SPEAKER_RE: Regex = Regex::new(r"^(?:話者|(?i:speaker))\s*\d+").unwrap();
}

/// パース統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    /// 入力の総行数
    pub total_lines: usize,
    /// 検証に失敗して破棄したブロック数
    pub skipped_blocks: usize,
    /// どのブロックにも属さない行数
    pub invalid_lines: usize,
}

/// パース結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    pub utterances: Vec<Utterance>,
    pub report: ParseReport,
}

impl Transcript {
    /// 話者ごとの発言数
    pub fn speaker_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for u in &self.utterances {
            *counts.entry(u.speaker.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }
}

/// 読み取り中のブロック
#[derive(Debug, Default)]
struct PendingBlock {
    start: String,
    end: String,
    speaker: Option<String>,
    lines: Vec<String>,
}

impl PendingBlock {
    fn opened(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            ..Default::default()
        }
    }

    /// タイムコード・話者・テキストがすべて揃っていれば発言を返す
    fn into_utterance(self) -> std::result::Result<Utterance, PendingBlock> {
        let text = self.lines.join("\n").trim().to_string();
        let speaker_ok = self
            .speaker
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false);

        if self.start.is_empty() || self.end.is_empty() || !speaker_ok || text.is_empty() {
            return Err(self);
        }

        Ok(Utterance {
            start_time: self.start,
            end_time: self.end,
            speaker: self.speaker.unwrap_or_default(),
            text,
        })
    }
}

/// パーサーの状態（呼び出しごとに新規作成）
struct Parser {
    pending: Option<PendingBlock>,
    utterances: Vec<Utterance>,
    report: ParseReport,
}

impl Parser {
    fn new() -> Self {
        Self {
            pending: None,
            utterances: Vec::new(),
            report: ParseReport::default(),
        }
    }

    fn feed(&mut self, line_num: usize, raw: &str) {
        let line = raw.trim();

        if line.is_empty() {
            self.flush(line_num);
            return;
        }

        if let Some(caps) = TIMECODE_RE.captures(line) {
            self.flush(line_num);
            let start = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let end = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            self.pending = Some(PendingBlock::opened(start, end));
            return;
        }

        let Some(block) = self.pending.as_mut() else {
            self.invalid_line(line_num, line);
            return;
        };

        if block.speaker.is_some() {
            block.lines.push(line.to_string());
            return;
        }

        if let Some(m) = SPEAKER_RE.find(line) {
            block.speaker = Some(m.as_str().to_string());
            return;
        }

        // タイムコード直後の話者以外の行
        self.invalid_line(line_num, line);
    }

    fn flush(&mut self, line_num: usize) {
        let Some(block) = self.pending.take() else {
            return;
        };

        match block.into_utterance() {
            Ok(utterance) => self.utterances.push(utterance),
            Err(block) => {
                self.report.skipped_blocks += 1;
                tracing::warn!(
                    line = line_num,
                    start = if block.start.is_empty() { "なし" } else { block.start.as_str() },
                    end = if block.end.is_empty() { "なし" } else { block.end.as_str() },
                    speaker = block.speaker.as_deref().unwrap_or("なし"),
                    has_text = !block.lines.is_empty(),
                    "無効なブロックをスキップしました"
                );
            }
        }
    }

    fn invalid_line(&mut self, line_num: usize, line: &str) {
        self.report.invalid_lines += 1;
        if self.report.invalid_lines <= INVALID_LINE_WARN_LIMIT {
            let preview: String = line.chars().take(50).collect();
            tracing::warn!(line = line_num, "予期しない形式の行: {}", preview);
        }
    }

    fn finish(mut self, total_lines: usize) -> Transcript {
        self.flush(total_lines);
        self.report.total_lines = total_lines;
        Transcript {
            utterances: self.utterances,
            report: self.report,
        }
    }
}

/// 文字起こしテキストをパース
///
/// # Arguments
/// * `content` - 文字起こしテキスト全体
///
/// # Returns
/// 発言リスト（ファイル順）とパース統計
pub fn parse_transcript_str(content: &str) -> Transcript {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let mut parser = Parser::new();
    let mut total_lines = 0;

    for (idx, line) in content.lines().enumerate() {
        total_lines = idx + 1;
        parser.feed(total_lines, line);
    }

    let transcript = parser.finish(total_lines);
    log_summary(&transcript);
    transcript
}

/// 文字起こしファイルをパース
///
/// ファイルが読めない場合のみエラー。不正なデータは読み飛ばす。
pub fn parse_transcript(path: &Path) -> Result<Transcript> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), "文字起こしファイルを読み込めません: {}", e);
        e
    })?;
    tracing::debug!(path = %path.display(), lines = content.lines().count(), "文字起こしファイルを読み込みました");
    Ok(parse_transcript_str(&content))
}

fn log_summary(transcript: &Transcript) {
    let report = &transcript.report;
    tracing::info!(
        utterances = transcript.len(),
        skipped_blocks = report.skipped_blocks,
        invalid_lines = report.invalid_lines,
        "文字起こしパース完了"
    );

    for (speaker, count) in transcript.speaker_counts() {
        tracing::debug!("  {}: {}件", speaker, count);
    }

    for (i, u) in transcript.utterances.iter().take(SAMPLE_COUNT).enumerate() {
        let preview: String = u.text.chars().take(100).collect();
        tracing::debug!(
            "  [{}] 話者: {}, 開始: {}, 終了: {}, テキスト: {}",
            i + 1,
            u.speaker,
            u.start_time,
            u.end_time,
            preview
        );
    }
}
