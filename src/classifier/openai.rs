//! OpenAI Chat Completions クライアント

use qa_matcher_common::classifier::{ClassifierClient, CompletionRequest};
use qa_matcher_common::{Error, Result};
use serde_json::json;
use std::time::Duration;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Classifier(format!("HTTPクライアント初期化エラー: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            model,
            endpoint: OPENAI_API_URL.to_string(),
        })
    }

    /// 互換APIなど別のエンドポイントを使う
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": request.prompt }
            ],
            "temperature": request.temperature,
            "max_completion_tokens": request.max_tokens,
        })
    }
}

/// レスポンスJSONから応答テキストを取り出す
pub fn extract_content(payload: &serde_json::Value) -> Result<String> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| Error::Classifier("レスポンスに choices[0].message.content がありません".into()))
}

impl ClassifierClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .map_err(|e| Error::Classifier(format!("OpenAI API呼び出しエラー: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(Error::Classifier(format!(
                "OpenAI API failed with status {}: {}",
                status, text
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .map_err(|e| Error::Classifier(format!("OpenAIレスポンスのパースに失敗: {}", e)))?;

        let content = extract_content(&payload)?;
        tracing::debug!(model = %self.model, response = %content, "OpenAI応答");
        Ok(content)
    }
}
