//! AI CLI（claude / codex / gemini）経由の判定クライアント
//!
//! CLIは温度・最大トークンを受け付けないため、プロンプトのみ渡す。

use crate::ai_provider::AiProvider;
use qa_matcher_common::classifier::{ClassifierClient, CompletionRequest};
use qa_matcher_common::{Error, Result};
use std::process::Command;

pub struct CliClient {
    provider: AiProvider,
    program: &'static str,
}

impl CliClient {
    /// CLIプロバイダ用のクライアントを作成（APIプロバイダは `None`）
    pub fn new(provider: AiProvider) -> Option<Self> {
        provider
            .command_name()
            .map(|program| Self { provider, program })
    }

    fn args<'a>(&self, prompt: &'a str) -> Vec<&'a str> {
        match self.provider {
            AiProvider::Codex => vec!["exec", prompt],
            AiProvider::Gemini => vec!["-p", prompt],
            _ => vec!["-p", prompt, "--output-format", "text"],
        }
    }
}

/// cmd経由で渡す場合のみ改行と引用符をエスケープ
#[cfg(windows)]
fn prepare_prompt(prompt: &str) -> String {
    prompt.replace('\n', " ").replace('"', "\\\"")
}

/// シェルを介さず引数として渡すためそのまま使う
#[cfg(not(windows))]
fn prepare_prompt(prompt: &str) -> String {
    prompt.to_string()
}

impl ClassifierClient for CliClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let prompt = prepare_prompt(&request.prompt);
        let args = self.args(&prompt);

        #[cfg(windows)]
        let output = Command::new("cmd")
            .arg("/c")
            .arg(self.program)
            .args(&args)
            .output();

        #[cfg(not(windows))]
        let output = Command::new(self.program).args(&args).output();

        let output = output.map_err(|e| {
            Error::Classifier(format!("{} CLI実行エラー: {}", self.program, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Classifier(format!(
                "{} CLI failed (code {:?}): {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        tracing::debug!(
            provider = %self.provider,
            response = %response.chars().take(100).collect::<String>(),
            "CLI応答"
        );
        Ok(response)
    }
}
