//! 照合イベント
//!
//! 照合エンジンの診断情報（列解決・照合成功・件数）を構造化イベントとして通知する。
//! 出力先（ログ、テスト用の記録など）は実装側で決める。

use crate::chunk_matcher::MatchTier;

/// 回答根拠の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceSource {
    /// 人間判定CSV（完全一致）
    ManualExact,
    /// 人間判定CSV（部分一致）
    ManualFuzzy,
    /// 文字起こし
    Transcript,
    /// 人間判定で未回答・回答方法空白 → 文字起こしで再照合
    TranscriptTieBreak,
}

impl std::fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvidenceSource::ManualExact => write!(f, "人間判定（完全一致）"),
            EvidenceSource::ManualFuzzy => write!(f, "人間判定（部分一致）"),
            EvidenceSource::Transcript => write!(f, "文字起こし"),
            EvidenceSource::TranscriptTieBreak => write!(f, "文字起こし（再照合）"),
        }
    }
}

/// 照合イベント
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    /// 列名を解決した
    ColumnResolved { field: String, column: String },
    /// 任意列が見つからなかった
    ColumnMissing { field: String },
    /// 人間判定CSVの索引を作成した
    ManualIndexed { answered_rows: usize, unique_questions: usize },
    /// 再照合候補（未回答・回答方法空白）の件数
    TieBreakCandidates { count: usize },
    /// 質問に回答根拠が見つかった
    QuestionMatched {
        row: usize,
        source: EvidenceSource,
        tier: Option<MatchTier>,
        question: String,
        evidence: String,
    },
    /// 質問の処理が終わった（進捗表示用）
    QuestionProcessed { row: usize, total: usize },
    /// 照合完了
    Finished { matched: usize, total: usize },
}

/// イベント受信側
pub trait MatchObserver: Send + Sync {
    fn on_event(&self, event: &MatchEvent);
}

/// 何もしないオブザーバ
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl MatchObserver for NullObserver {
    fn on_event(&self, _event: &MatchEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_source_display() {
        assert_eq!(EvidenceSource::Transcript.to_string(), "文字起こし");
        assert_eq!(EvidenceSource::ManualExact.to_string(), "人間判定（完全一致）");
    }

    #[test]
    fn test_null_observer_accepts_events() {
        NullObserver.on_event(&MatchEvent::Finished { matched: 0, total: 0 });
    }
}
