use thiserror::Error;

#[derive(Error, Debug)]
pub enum QaMatcherError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`qa-matcher config --set-api-key YOUR_KEY` で設定するか、OPENAI_API_KEY を設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応の表形式です: {0}（csv / xlsx / xls / ods に対応）")]
    UnsupportedFormat(String),

    #[error("表の読み込みエラー: {0}")]
    TableRead(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("照合ジョブが異常終了しました: {0}")]
    Job(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] qa_matcher_common::Error),
}

pub type Result<T> = std::result::Result<T, QaMatcherError>;
