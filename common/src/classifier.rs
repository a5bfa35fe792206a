//! AI判定モジュール
//!
//! 文字列照合で判定できない場合に外部AIへ YES/NO 判定を依頼する。
//! 呼び出し前に必ずレート制限を通し、失敗時はエラーにせず「判定不能」を返す。

use crate::error::Result;
use crate::prompts::{build_match_prompt, MATCH_MAX_TOKENS, MATCH_TEMPERATURE};
use crate::rate_limiter::RateLimiter;
use std::sync::Arc;

/// AI判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Answered,
    Unanswered,
    /// 呼び出し失敗などで判定材料がない
    Indeterminate,
}

impl Verdict {
    /// 確定した判定のみ bool で返す
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Verdict::Answered => Some(true),
            Verdict::Unanswered => Some(false),
            Verdict::Indeterminate => None,
        }
    }
}

/// 1回の補完リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// 外部AIクライアント（HTTP API、CLIなど）
pub trait ClassifierClient: Send + Sync {
    /// プロンプトを送信し応答テキストを返す
    fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// チャンク照合から使うフォールバック判定器
pub trait FallbackClassifier: Send + Sync {
    fn classify(&self, question: &str, answer: &str) -> Verdict;
}

/// レート制限付きAI判定器
pub struct AiFallbackClassifier {
    client: Arc<dyn ClassifierClient>,
    limiter: Arc<RateLimiter>,
}

impl AiFallbackClassifier {
    pub fn new(client: Arc<dyn ClassifierClient>, limiter: Arc<RateLimiter>) -> Self {
        Self { client, limiter }
    }
}

impl FallbackClassifier for AiFallbackClassifier {
    fn classify(&self, question: &str, answer: &str) -> Verdict {
        if question.trim().is_empty() || answer.trim().is_empty() {
            return Verdict::Indeterminate;
        }

        self.limiter.wait_if_needed();

        let request = CompletionRequest {
            prompt: build_match_prompt(question, answer),
            temperature: MATCH_TEMPERATURE,
            max_tokens: MATCH_MAX_TOKENS,
        };

        match self.client.complete(&request) {
            Ok(response) => {
                let answered = parse_verdict(&response);
                tracing::debug!(answered, response = response.trim(), "AI判定");
                if answered {
                    Verdict::Answered
                } else {
                    Verdict::Unanswered
                }
            }
            Err(e) => {
                tracing::warn!("AI判定エラー: {}", e);
                Verdict::Indeterminate
            }
        }
    }
}

/// AI応答テキストを判定に変換
///
/// 「未回答」は「回答」を含むため先に否定として扱う。
/// 肯定・否定のどちらとも読めない応答は未回答（安全側）。
pub fn parse_verdict(response: &str) -> bool {
    let text = response.trim().to_uppercase();

    if text.contains("未回答") {
        return false;
    }
    if text.contains("YES") || text.contains("はい") || text.contains("回答") {
        return true;
    }
    if text.contains("NO") || text.contains("いいえ") {
        return false;
    }
    false
}
