use crate::error::{QaMatcherError, Result};
use qa_matcher_common::chunk_matcher::DEFAULT_THRESHOLD;
use qa_matcher_common::rate_limiter::DEFAULT_MAX_REQUESTS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub max_requests_per_minute: usize,
    pub threshold: f64,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".into(),
            max_requests_per_minute: DEFAULT_MAX_REQUESTS,
            threshold: DEFAULT_THRESHOLD,
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config = Self::load_unchecked()?;
        config.validate()?;
        Ok(config)
    }

    /// 値の検証をせずに読み込む（`config` サブコマンドで設定を確認・修復する用）
    pub fn load_unchecked() -> Result<Self> {
        Self::read_from(&Self::config_path()?)
    }

    fn read_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| QaMatcherError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("qa-matcher").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(QaMatcherError::Config(format!(
                "threshold は 0.0〜1.0 で指定してください: {}",
                self.threshold
            )));
        }
        if self.max_requests_per_minute == 0 {
            return Err(QaMatcherError::Config(
                "max_requests_per_minute は1以上で指定してください".into(),
            ));
        }
        Ok(())
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(QaMatcherError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}
