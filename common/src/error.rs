//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// 必須列が見つからない（試した候補と実際の列名を列挙）
    #[error("{field}の列が見つかりません（候補: {}）。利用可能な列: {}", format_names(.candidates), format_names(.available))]
    ColumnNotFound {
        field: String,
        candidates: Vec<String>,
        available: Vec<String>,
    },

    #[error("Classifier error: {0}")]
    Classifier(String),
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        return "なし".to_string();
    }
    names
        .iter()
        .map(|n| format!("\"{}\"", n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
