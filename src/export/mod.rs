pub mod excel;

use crate::cli::OutputFormat;
use crate::error::Result;
use qa_matcher_common::{MatchOutput, MatchSummary, Table};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a MatchSummary,
    table: &'a Table,
}

/// 出力先が未指定のときのファイル名（タイムスタンプ付き）
pub fn default_output_path(format: OutputFormat) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("qa_match_{}.{}", stamp, format.extension()))
}

pub fn export_output(output: &MatchOutput, format: OutputFormat, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        OutputFormat::Csv => {
            std::fs::write(output_path, output.table.to_csv_string())?;
        }
        OutputFormat::Xlsx => {
            excel::generate_excel(&output.table, output_path)?;
        }
        OutputFormat::Json => {
            let report = JsonReport {
                summary: &output.summary,
                table: &output.table,
            };
            std::fs::write(output_path, serde_json::to_string_pretty(&report)?)?;
        }
    }

    tracing::info!(path = %output_path.display(), format = %format, "結果を出力しました");
    Ok(())
}
