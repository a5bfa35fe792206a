//! チャンク照合モジュール
//!
//! 質問テキストと回答テキストを段階的に照合する:
//! 1. 完全一致
//! 2. 包含（双方向）
//! 3. 短い質問（3文字以下）は包含のみで判定
//! 4. チャンク一致率（日本語・英数字の連続を単位に数える）
//! 5. AI判定（一致率が閾値未満の場合のみ）

use crate::classifier::FallbackClassifier;
use crate::text::normalize_text;
use regex::Regex;
use std::sync::Arc;

/// チャンク一致率のデフォルト閾値
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// この文字数以下の質問は包含判定のみ（AI判定しない）
const SHORT_QUESTION_LEN: usize = 3;

/// 短い質問に対して逆向き包含を許す回答の最大文字数
const SHORT_ANSWER_LEN: usize = 10;

lazy_static::lazy_static! {
    // ひらがな・カタカナ・漢字・英数字の連続
    static ref CHUNK_RE: Regex = Regex::new(r"[\u{3040}-\u{309F}\u{30A0}-\u{30FF}\u{4E00}-\u{9FAF}\w]+").unwrap();
    // 空白・句読点区切り
    static ref SEPARATOR_RE: Regex = Regex::new(r"[\s、。，．]+").unwrap();
}

/// 照合が成立した段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Containment,
    ShortText,
    ChunkRatio,
    AiFallback,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "完全一致"),
            MatchTier::Containment => write!(f, "部分一致"),
            MatchTier::ShortText => write!(f, "短文一致"),
            MatchTier::ChunkRatio => write!(f, "チャンク一致"),
            MatchTier::AiFallback => write!(f, "AI判定"),
        }
    }
}

/// 段階的な質問・回答照合器
#[derive(Clone)]
pub struct ChunkMatcher {
    threshold: f64,
    fallback: Option<Arc<dyn FallbackClassifier>>,
}

impl std::fmt::Debug for ChunkMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkMatcher")
            .field("threshold", &self.threshold)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl Default for ChunkMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ChunkMatcher {
    /// AI判定なしで作成
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            fallback: None,
        }
    }

    /// AI判定を設定
    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackClassifier>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// 質問が回答されたか
    pub fn is_question_answered(&self, question: &str, answer: &str) -> bool {
        self.evaluate(question, answer).is_some()
    }

    /// 照合を実行し、成立した段階を返す（不成立なら `None`）
    pub fn evaluate(&self, question: &str, answer: &str) -> Option<MatchTier> {
        let question = normalize_text(question)?;
        let answer = normalize_text(answer)?;

        if question == answer {
            return Some(MatchTier::Exact);
        }

        if answer.contains(question.as_str()) || question.contains(answer.as_str()) {
            return Some(MatchTier::Containment);
        }

        let question_len = question.chars().count();
        if question_len <= SHORT_QUESTION_LEN {
            let answer_len = answer.chars().count();
            let matched = answer.contains(question.as_str())
                || (answer_len <= SHORT_ANSWER_LEN && question.contains(answer.as_str()));
            return matched.then_some(MatchTier::ShortText);
        }

        let chunks = split_chunks(&question);
        if chunks.is_empty() {
            return None;
        }

        if chunk_ratio(&chunks, &answer) >= self.threshold {
            return Some(MatchTier::ChunkRatio);
        }

        // 一致率が閾値未満の場合のみAI判定
        let fallback = self.fallback.as_ref()?;
        match fallback.classify(&question, &answer).as_bool() {
            Some(true) => Some(MatchTier::AiFallback),
            _ => None,
        }
    }
}

/// 質問テキストをチャンクに分割
///
/// 日本語・英数字の連続を抽出し、見つからなければ空白・句読点で分割する。
pub fn split_chunks(text: &str) -> Vec<&str> {
    let chunks: Vec<&str> = CHUNK_RE.find_iter(text).map(|m| m.as_str()).collect();
    if !chunks.is_empty() {
        return chunks;
    }

    SEPARATOR_RE
        .split(text)
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect()
}

/// 回答テキストに含まれるチャンクの割合
pub fn chunk_ratio(chunks: &[&str], answer: &str) -> f64 {
    if chunks.is_empty() {
        return 0.0;
    }
    let matched = chunks.iter().filter(|c| answer.contains(**c)).count();
    matched as f64 / chunks.len() as f64
}
