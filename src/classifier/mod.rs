//! AI判定バックエンドの選択
//!
//! - `openai`: Chat Completions API（APIキー必須）
//! - `claude` / `codex` / `gemini`: ローカルCLI

mod cli_client;
mod openai;

pub use cli_client::CliClient;
pub use openai::{extract_content, OpenAiClient, OPENAI_API_URL};

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::Result;
use qa_matcher_common::{AiFallbackClassifier, ClassifierClient, FallbackClassifier, RateLimiter};
use std::sync::Arc;
use std::time::Duration;

/// 判定クライアントを作成
pub fn build_client(provider: AiProvider, config: &Config) -> Result<Arc<dyn ClassifierClient>> {
    if let Some(client) = CliClient::new(provider) {
        return Ok(Arc::new(client));
    }

    let api_key = config.get_api_key()?;
    let client = OpenAiClient::new(
        api_key,
        config.model.clone(),
        Duration::from_secs(config.timeout_seconds),
    )?;
    Ok(Arc::new(client))
}

/// AIフォールバック判定器を作成（`no_ai` の場合は `None`）
pub fn build_fallback(
    provider: AiProvider,
    config: &Config,
    no_ai: bool,
) -> Result<Option<Arc<dyn FallbackClassifier>>> {
    if no_ai {
        tracing::info!("AI判定は無効です（文字列照合のみ）");
        return Ok(None);
    }

    let client = build_client(provider, config)?;
    let limiter = Arc::new(RateLimiter::new(config.max_requests_per_minute));
    tracing::info!(
        provider = %provider,
        max_requests_per_minute = limiter.max_requests(),
        "AI判定を有効化"
    );

    Ok(Some(Arc::new(AiFallbackClassifier::new(client, limiter))))
}
