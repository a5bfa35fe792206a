//! 照合エンジン
//!
//! 質問CSV・人間判定CSV・文字起こしを照合し、各質問に
//! 「回答状況」「回答方法」を付けた新しい表を返す。
//!
//! ## 根拠の優先順位
//! 1. 人間判定CSV（完全一致）
//! 2. 人間判定CSV（部分一致）
//! 3. 文字起こし（部分一致、AI判定を含む）
//! 4. 未回答（FALSE、回答方法は空）
//!
//! 一度回答済みになった質問は、より低い優先度の根拠では再評価しない。

use crate::chunk_matcher::{ChunkMatcher, MatchTier};
use crate::error::Result;
use crate::observer::{EvidenceSource, MatchEvent, MatchObserver, NullObserver};
use crate::schema::{ColumnSpec, MANUAL_ANSWERED, MANUAL_METHOD, MANUAL_QUESTION, QUESTION_TEXT};
use crate::table::Table;
use crate::text::{is_missing, normalize_text};
use crate::types::{MatchResult, Utterance, METHOD_OPERATOR, METHOD_PERFORMER};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// 出力表の回答状況列
pub const ANSWERED_COLUMN: &str = "回答状況";

/// 出力表の回答方法列
pub const METHOD_COLUMN: &str = "回答方法";

const TRUTHY: &[&str] = &["TRUE", "1", "T", "YES", "Y"];
const FALSY: &[&str] = &["FALSE", "0", "F", "NO", "N"];

/// 人間判定CSVの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualJudgement {
    pub question_text: String,
    /// TRUE系なら `Some(true)`、FALSE系なら `Some(false)`、それ以外・列なしは `None`
    pub answered: Option<bool>,
    /// 回答方法（空白・"nan"・"NaN" は空文字列）
    pub method: String,
}

/// 回答方法セルが空扱いか（空白・"nan"・"NaN"）
fn is_blank_method(value: &str) -> bool {
    is_missing(value) || value.trim() == "NaN"
}

/// 回答済フラグのセル値を解釈
pub fn parse_answered_flag(value: &str) -> Option<bool> {
    let value = value.trim().to_uppercase();
    if TRUTHY.contains(&value.as_str()) {
        Some(true)
    } else if FALSY.contains(&value.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// 照合件数の内訳
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub total: usize,
    pub matched: usize,
    pub manual_exact: usize,
    pub manual_fuzzy: usize,
    pub transcript: usize,
    pub tie_break: usize,
}

impl MatchSummary {
    fn record(&mut self, source: EvidenceSource) {
        self.matched += 1;
        match source {
            EvidenceSource::ManualExact => self.manual_exact += 1,
            EvidenceSource::ManualFuzzy => self.manual_fuzzy += 1,
            EvidenceSource::Transcript => self.transcript += 1,
            EvidenceSource::TranscriptTieBreak => self.tie_break += 1,
        }
    }
}

/// 照合結果
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutput {
    /// 回答状況・回答方法を先頭に追加した表
    pub table: Table,
    /// 行ごとの結果（入力の行順）
    pub results: Vec<MatchResult>,
    pub summary: MatchSummary,
}

/// 回答済み質問の索引（挿入順を保持、重複は後勝ち）
#[derive(Debug, Default)]
struct ManualIndex {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl ManualIndex {
    fn insert(&mut self, question: String, method: String) {
        match self.positions.get(&question) {
            Some(&pos) => self.entries[pos].1 = method,
            None => {
                self.positions.insert(question.clone(), self.entries.len());
                self.entries.push((question, method));
            }
        }
    }

    fn exact(&self, question: &str) -> Option<&(String, String)> {
        self.positions.get(question).map(|&pos| &self.entries[pos])
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 照合エンジン
pub struct MatchEngine {
    matcher: ChunkMatcher,
    observer: Arc<dyn MatchObserver>,
}

impl MatchEngine {
    pub fn new(matcher: ChunkMatcher) -> Self {
        Self {
            matcher,
            observer: Arc::new(NullObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// 質問CSVと文字起こしを照合
    ///
    /// 各質問について発言を先頭から順に照合し、最初に一致した発言で「出演者」回答とする。
    pub fn match_questions_with_transcript(
        &self,
        questions: &Table,
        utterances: &[Utterance],
    ) -> Result<MatchOutput> {
        let question_col = self.resolve(&QUESTION_TEXT, questions)?;
        let total = questions.len();
        let mut results = Vec::with_capacity(total);
        let mut summary = MatchSummary {
            total,
            ..Default::default()
        };

        for row in 0..total {
            let mut result = MatchResult::default();

            if let Some(question) = normalize_text(questions.cell(row, question_col)) {
                if let Some((idx, tier)) = self.find_in_transcript(&question, utterances) {
                    result = MatchResult::answered_by(METHOD_PERFORMER);
                    self.matched(row, EvidenceSource::Transcript, Some(tier), &question, &utterances[idx].text);
                    summary.record(EvidenceSource::Transcript);
                }
            }

            results.push(result);
            self.observer.on_event(&MatchEvent::QuestionProcessed { row, total });
        }

        Ok(self.finish(questions, results, summary))
    }

    /// 質問CSVと人間判定CSV（＋任意で文字起こし）を照合
    ///
    /// 人間判定で回答済みの質問を完全一致→部分一致の順で照合する。
    /// 未回答のまま残った質問のうち、人間判定で「FALSE・回答方法空白」とされた質問に
    /// 該当するものは文字起こしと再照合する。
    pub fn match_questions_with_manual(
        &self,
        questions: &Table,
        manual: &Table,
        utterances: Option<&[Utterance]>,
    ) -> Result<MatchOutput> {
        let question_col = self.resolve(&QUESTION_TEXT, questions)?;
        let judgements = self.read_judgements(manual)?;

        let mut index = ManualIndex::default();
        let mut answered_rows = 0;
        let mut tie_break = Vec::new();

        for judgement in &judgements {
            let Some(key) = normalize_text(&judgement.question_text) else {
                continue;
            };
            match judgement.answered {
                Some(true) => {
                    let method = if judgement.method.is_empty() {
                        METHOD_OPERATOR.to_string()
                    } else {
                        judgement.method.clone()
                    };
                    index.insert(key, method);
                    answered_rows += 1;
                }
                Some(false) if judgement.method.is_empty() => tie_break.push(key),
                _ => {}
            }
        }

        self.observer.on_event(&MatchEvent::ManualIndexed {
            answered_rows,
            unique_questions: index.len(),
        });

        let utterances = utterances.filter(|u| !u.is_empty());
        if utterances.is_some() {
            self.observer.on_event(&MatchEvent::TieBreakCandidates {
                count: tie_break.len(),
            });
        }

        let total = questions.len();
        let mut results = Vec::with_capacity(total);
        let mut summary = MatchSummary {
            total,
            ..Default::default()
        };

        for row in 0..total {
            let mut result = MatchResult::default();

            if let Some(question) = normalize_text(questions.cell(row, question_col)) {
                if let Some((manual_question, method)) = index.exact(&question) {
                    result = MatchResult::answered_by(method.clone());
                    self.matched(row, EvidenceSource::ManualExact, Some(MatchTier::Exact), &question, manual_question);
                    summary.record(EvidenceSource::ManualExact);
                } else if let Some((manual_question, method, tier)) = index
                    .entries
                    .iter()
                    .find_map(|(mq, m)| self.matcher.evaluate(&question, mq).map(|t| (mq, m, t)))
                {
                    result = MatchResult::answered_by(method.clone());
                    self.matched(row, EvidenceSource::ManualFuzzy, Some(tier), &question, manual_question);
                    summary.record(EvidenceSource::ManualFuzzy);
                } else if let Some(utterances) = utterances {
                    let is_candidate = tie_break
                        .iter()
                        .any(|fb| *fb == question || self.matcher.is_question_answered(&question, fb));
                    if is_candidate {
                        if let Some((idx, tier)) = self.find_in_transcript(&question, utterances) {
                            result = MatchResult::answered_by(METHOD_PERFORMER);
                            self.matched(row, EvidenceSource::TranscriptTieBreak, Some(tier), &question, &utterances[idx].text);
                            summary.record(EvidenceSource::TranscriptTieBreak);
                        }
                    }
                }
            }

            results.push(result);
            self.observer.on_event(&MatchEvent::QuestionProcessed { row, total });
        }

        Ok(self.finish(questions, results, summary))
    }

    /// 人間判定CSVを読み取る
    ///
    /// 質問列がない場合はエラー。回答済列・回答方法列は任意。
    pub fn read_judgements(&self, manual: &Table) -> Result<Vec<ManualJudgement>> {
        let question_col = self.resolve(&MANUAL_QUESTION, manual)?;
        let answered_col = self.find_optional(&MANUAL_ANSWERED, manual);
        let method_col = self.find_optional(&MANUAL_METHOD, manual);

        let judgements = (0..manual.len())
            .map(|row| {
                let method = method_col
                    .map(|col| manual.cell(row, col).trim())
                    .filter(|m| !is_blank_method(m))
                    .unwrap_or_default()
                    .to_string();
                ManualJudgement {
                    question_text: manual.cell(row, question_col).trim().to_string(),
                    answered: answered_col.and_then(|col| parse_answered_flag(manual.cell(row, col))),
                    method,
                }
            })
            .collect();

        Ok(judgements)
    }

    /// 発言を順に照合し、最初に一致した発言の位置を返す
    fn find_in_transcript(&self, question: &str, utterances: &[Utterance]) -> Option<(usize, MatchTier)> {
        utterances
            .iter()
            .enumerate()
            .filter(|(_, u)| !u.text.trim().is_empty())
            .find_map(|(idx, u)| self.matcher.evaluate(question, &u.text).map(|tier| (idx, tier)))
    }

    fn resolve(&self, spec: &ColumnSpec, table: &Table) -> Result<usize> {
        let col = spec.resolve(table.columns())?;
        self.observer.on_event(&MatchEvent::ColumnResolved {
            field: spec.field.to_string(),
            column: table.columns()[col].clone(),
        });
        Ok(col)
    }

    fn find_optional(&self, spec: &ColumnSpec, table: &Table) -> Option<usize> {
        let found = spec.find(table.columns());
        let event = match found {
            Some(col) => MatchEvent::ColumnResolved {
                field: spec.field.to_string(),
                column: table.columns()[col].clone(),
            },
            None => MatchEvent::ColumnMissing {
                field: spec.field.to_string(),
            },
        };
        self.observer.on_event(&event);
        found
    }

    fn matched(&self, row: usize, source: EvidenceSource, tier: Option<MatchTier>, question: &str, evidence: &str) {
        self.observer.on_event(&MatchEvent::QuestionMatched {
            row,
            source,
            tier,
            question: question.to_string(),
            evidence: evidence.to_string(),
        });
    }

    fn finish(&self, questions: &Table, results: Vec<MatchResult>, summary: MatchSummary) -> MatchOutput {
        self.observer.on_event(&MatchEvent::Finished {
            matched: summary.matched,
            total: summary.total,
        });

        let answered = results
            .iter()
            .map(|r| (if r.answered { "TRUE" } else { "FALSE" }).to_string())
            .collect();
        let methods = results.iter().map(|r| r.method.clone()).collect();
        let table = questions.with_leading_columns(vec![
            (ANSWERED_COLUMN.to_string(), answered),
            (METHOD_COLUMN.to_string(), methods),
        ]);

        MatchOutput {
            table,
            results,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{FallbackClassifier, Verdict};
    use crate::error::Error;
    use crate::transcript::parse_transcript_str;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            columns.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn utterance(text: &str) -> Utterance {
        Utterance {
            start_time: "00:00:00:00".to_string(),
            end_time: "00:00:01:00".to_string(),
            speaker: "話者 1".to_string(),
            text: text.to_string(),
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<MatchEvent>>,
    }

    impl MatchObserver for RecordingObserver {
        fn on_event(&self, event: &MatchEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    struct FixedFallback {
        verdict: Verdict,
        calls: AtomicUsize,
    }

    impl FallbackClassifier for FixedFallback {
        fn classify(&self, _question: &str, _answer: &str) -> Verdict {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }

    #[test]
    fn test_transcript_scenario_containment() {
        let transcript = parse_transcript_str("00:00:00:01 - 00:00:05:00\n話者 1\n今日は晴れです\n");
        let questions = table(&["original_text"], &[&["今日は"]]);
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_transcript(&questions, &transcript.utterances)
            .unwrap();
        assert_eq!(out.results[0], MatchResult::answered_by("出演者"));
        assert_eq!(out.table.columns()[0], "回答状況");
        assert_eq!(out.table.columns()[1], "回答方法");
        assert_eq!(out.table.rows()[0], vec!["TRUE", "出演者", "今日は"]);
    }

    #[test]
    fn test_transcript_unanswered_and_absent_rows() {
        let questions = table(&["質問", "名前"], &[&["好きな色は？", "A"], &["nan", "B"], &["", "C"]]);
        let utterances = vec![utterance("全然関係ない話")];
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_transcript(&questions, &utterances)
            .unwrap();
        assert!(out.results.iter().all(|r| !r.answered && r.method.is_empty()));
        assert_eq!(out.table.rows()[1], vec!["FALSE", "", "nan", "B"]);
        assert_eq!(out.summary, MatchSummary { total: 3, ..Default::default() });
    }

    #[test]
    fn test_transcript_first_matching_utterance_wins() {
        let observer = Arc::new(RecordingObserver::default());
        let questions = table(&["text"], &[&["配信時間"]]);
        let utterances = vec![utterance("雑談"), utterance("配信時間は夜です"), utterance("配信時間は未定")];
        MatchEngine::new(ChunkMatcher::default())
            .with_observer(observer.clone())
            .match_questions_with_transcript(&questions, &utterances)
            .unwrap();
        let events = observer.events.lock().unwrap();
        let evidence: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                MatchEvent::QuestionMatched { evidence, .. } => Some(evidence.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(evidence, vec!["配信時間は夜です"]);
    }

    #[test]
    fn test_transcript_missing_question_column() {
        let questions = table(&["名前", "日時"], &[&["A", "B"]]);
        let err = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_transcript(&questions, &[])
            .unwrap_err();
        match err {
            Error::ColumnNotFound { available, .. } => assert_eq!(available, vec!["名前", "日時"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_manual_scenario_exact_match() {
        let manual = table(&["質問", "回答済み", "回答方法"], &[&["これは質問ですか", "TRUE", "運営コメント"]]);
        let questions = table(&["original_text"], &[&["これは質問ですか"]]);
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, None)
            .unwrap();
        assert_eq!(out.results[0], MatchResult::answered_by("運営コメント"));
        assert_eq!(out.summary.manual_exact, 1);
    }

    #[test]
    fn test_manual_scenario_false_blank_falls_back_to_transcript() {
        let manual = table(&["質問", "回答済み", "回答方法"], &[&["明日の予定は？", "FALSE", ""]]);
        let questions = table(&["original_text"], &[&["明日の予定は？"]]);
        let utterances = vec![utterance("明日の予定は？えーと、収録です")];
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, Some(&utterances))
            .unwrap();
        assert_eq!(out.results[0], MatchResult::answered_by("出演者"));
        assert_eq!(out.summary.tie_break, 1);
    }

    #[test]
    fn test_manual_false_with_nan_method_falls_back_to_transcript() {
        let manual = table(&["質問", "回答済み", "回答方法"], &[&["明日の予定は？", "FALSE", "NaN"]]);
        let questions = table(&["original_text"], &[&["明日の予定は？"]]);
        let utterances = vec![utterance("明日の予定は？えーと、収録です")];
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, Some(&utterances))
            .unwrap();
        assert_eq!(out.results[0], MatchResult::answered_by("出演者"));
        assert_eq!(out.summary.tie_break, 1);
    }

    #[test]
    fn test_manual_false_with_method_does_not_fall_back() {
        let manual = table(&["質問", "回答済み", "回答方法"], &[&["明日の予定は？", "FALSE", "対象外"]]);
        let questions = table(&["original_text"], &[&["明日の予定は？"]]);
        let utterances = vec![utterance("明日の予定は？えーと、収録です")];
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, Some(&utterances))
            .unwrap();
        assert_eq!(out.results[0], MatchResult::default());
    }

    #[test]
    fn test_manual_without_transcript_leaves_false_blank_unanswered() {
        let manual = table(&["質問", "回答済み"], &[&["明日の予定は？", "no"]]);
        let questions = table(&["original_text"], &[&["明日の予定は？"]]);
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, None)
            .unwrap();
        assert!(!out.results[0].answered);
    }

    #[test]
    fn test_manual_blank_method_defaults_to_operator() {
        let manual = table(&["質問", "回答済"], &[&["好きな色は？", "yes"]]);
        let questions = table(&["質問"], &[&["好きな色は？"]]);
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, None)
            .unwrap();
        assert_eq!(out.results[0], MatchResult::answered_by("運営コメント"));
    }

    #[test]
    fn test_manual_nan_method_defaults_to_operator() {
        let manual = table(&["質問", "回答済み", "回答方法"], &[&["好きな色は？", "1", "nan"]]);
        let questions = table(&["質問"], &[&["好きな色は？"]]);
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, None)
            .unwrap();
        assert_eq!(out.results[0].method, "運営コメント");
    }

    #[test]
    fn test_manual_duplicates_last_write_wins() {
        let manual = table(
            &["質問", "回答済み", "回答方法"],
            &[&["好きな色は？", "TRUE", "運営コメント"], &["好きな色は？", "TRUE", "出演者"]],
        );
        let questions = table(&["質問"], &[&["好きな色は？"]]);
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, None)
            .unwrap();
        assert_eq!(out.results[0].method, "出演者");
    }

    #[test]
    fn test_manual_exact_preferred_over_earlier_fuzzy_entry() {
        // 「好きな色」は質問に含まれるため部分一致するが、完全一致の行が優先される
        let manual = table(
            &["質問", "回答済み", "回答方法"],
            &[&["好きな色", "TRUE", "部分"], &["好きな色は何ですか", "TRUE", "完全"]],
        );
        let questions = table(&["質問"], &[&["好きな色は何ですか"]]);
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, None)
            .unwrap();
        assert_eq!(out.results[0].method, "完全");
        assert_eq!(out.summary.manual_exact, 1);
    }

    #[test]
    fn test_manual_fuzzy_match_first_entry_wins() {
        let manual = table(
            &["質問", "回答済み", "回答方法"],
            &[&["次回の配信", "TRUE", "一件目"], &["配信", "TRUE", "二件目"]],
        );
        let questions = table(&["質問"], &[&["次回の配信はいつ？"]]);
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, None)
            .unwrap();
        assert_eq!(out.results[0].method, "一件目");
        assert_eq!(out.summary.manual_fuzzy, 1);
    }

    #[test]
    fn test_manual_answered_not_overridden_by_transcript() {
        let manual = table(
            &["質問", "回答済み", "回答方法"],
            &[&["好きな色は？", "TRUE", "運営コメント"], &["好きな色は？", "FALSE", ""]],
        );
        let questions = table(&["質問"], &[&["好きな色は？"]]);
        let utterances = vec![utterance("好きな色は？青です")];
        let out = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, Some(&utterances))
            .unwrap();
        assert_eq!(out.results[0].method, "運営コメント");
        assert_eq!(out.summary.tie_break, 0);
    }

    #[test]
    fn test_manual_missing_question_column() {
        let manual = table(&["名前", "回答済み"], &[&["A", "TRUE"]]);
        let questions = table(&["質問"], &[&["Q"]]);
        let err = MatchEngine::new(ChunkMatcher::default())
            .match_questions_with_manual(&questions, &manual, None)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("\"名前\""));
        assert!(message.contains("\"回答済み\""));
    }

    #[test]
    fn test_manual_without_answered_column_indexes_nothing() {
        let observer = Arc::new(RecordingObserver::default());
        let manual = table(&["質問"], &[&["好きな色は？"]]);
        let questions = table(&["質問"], &[&["好きな色は？"]]);
        let out = MatchEngine::new(ChunkMatcher::default())
            .with_observer(observer.clone())
            .match_questions_with_manual(&questions, &manual, None)
            .unwrap();
        assert!(!out.results[0].answered);
        let events = observer.events.lock().unwrap();
        assert!(events.contains(&MatchEvent::ColumnMissing { field: "回答済".to_string() }));
        assert!(events.contains(&MatchEvent::ManualIndexed { answered_rows: 0, unique_questions: 0 }));
    }

    #[test]
    fn test_inputs_are_not_mutated_and_runs_are_idempotent() {
        let fallback = Arc::new(FixedFallback { verdict: Verdict::Answered, calls: AtomicUsize::new(0) });
        let engine = MatchEngine::new(ChunkMatcher::default().with_fallback(fallback.clone()));
        let manual = table(&["質問", "回答済み"], &[&["好きな色は？", "TRUE"], &["今後の予定を教えて", "FALSE"]]);
        let questions = table(&["質問", "id"], &[&["好きな色は？", "1"], &["今後の予定を教えてください", "2"], &["犬派？猫派？", "3"]]);
        let utterances = vec![utterance("まったく別の話題です")];
        let before = questions.clone();

        let first = engine.match_questions_with_manual(&questions, &manual, Some(&utterances)).unwrap();
        let second = engine.match_questions_with_manual(&questions, &manual, Some(&utterances)).unwrap();
        assert_eq!(first, second);
        assert_eq!(questions, before);

        let t1 = engine.match_questions_with_transcript(&questions, &utterances).unwrap();
        let t2 = engine.match_questions_with_transcript(&questions, &utterances).unwrap();
        assert_eq!(t1, t2);
        assert!(fallback.calls.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_observer_receives_progress_and_finish() {
        let observer = Arc::new(RecordingObserver::default());
        let questions = table(&["質問"], &[&["A"], &["B"]]);
        MatchEngine::new(ChunkMatcher::default())
            .with_observer(observer.clone())
            .match_questions_with_transcript(&questions, &[utterance("A")])
            .unwrap();
        let events = observer.events.lock().unwrap();
        let processed = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::QuestionProcessed { .. }))
            .count();
        assert_eq!(processed, 2);
        assert_eq!(events.last(), Some(&MatchEvent::Finished { matched: 1, total: 2 }));
    }

    #[test]
    fn test_parse_answered_flag() {
        assert_eq!(parse_answered_flag(" true "), Some(true));
        assert_eq!(parse_answered_flag("Y"), Some(true));
        assert_eq!(parse_answered_flag("0"), Some(false));
        assert_eq!(parse_answered_flag("No"), Some(false));
        assert_eq!(parse_answered_flag(""), None);
        assert_eq!(parse_answered_flag("保留"), None);
    }
}
