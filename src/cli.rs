use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qa-matcher")]
#[command(about = "ライブ配信チャット質問の回答照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (openai/claude/codex/gemini)
    #[arg(long, default_value = "openai", global = true)]
    pub ai_provider: AiProvider,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 質問表を文字起こし・人間判定CSVと照合
    Match {
        /// 質問表（csv/xlsx/xls/ods）
        #[arg(required = true)]
        questions: PathBuf,

        /// 文字起こしファイル
        #[arg(short, long)]
        transcript: Option<PathBuf>,

        /// 人間判定CSV（質問・回答済・回答方法）
        #[arg(short, long)]
        manual: Option<PathBuf>,

        /// 出力ファイル（デフォルト: qa_match_<日時>.<拡張子>）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/xlsx/json)
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// チャンク一致率の閾値（0.0-1.0、省略時は設定ファイルの値）
        #[arg(long)]
        threshold: Option<f64>,

        /// AI判定を使わない（文字列照合のみ）
        #[arg(long)]
        no_ai: bool,
    },

    /// 文字起こしをパースしてJSONを出力
    Parse {
        /// 文字起こしファイル
        #[arg(required = true)]
        transcript: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Xlsx,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, xlsx, or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
