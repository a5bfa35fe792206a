//! qa-matcher: ライブ配信のチャット質問に回答があったかを照合するCLI
//!
//! 照合ロジックは `qa_matcher_common` にあり、このクレートは
//! 設定・表ファイルの入出力・AIバックエンド・ログを担当する。

pub mod ai_provider;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod table_io;
pub mod runner;
