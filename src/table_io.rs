//! 表ファイルの読み込み（CSV / Excel / ODS）

use crate::error::{QaMatcherError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use qa_matcher_common::Table;
use std::path::Path;

/// 拡張子に応じて表を読み込む
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(QaMatcherError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => Table::from_csv_file(path)?,
        "xlsx" | "xlsm" | "xls" | "ods" => load_workbook(path)?,
        _ => return Err(QaMatcherError::UnsupportedFormat(path.display().to_string())),
    };

    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "表を読み込みました"
    );
    Ok(table)
}

/// 先頭シートを読み込む（1行目はヘッダー）
fn load_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| QaMatcherError::TableRead(format!("{}: {}", path.display(), e)))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| QaMatcherError::TableRead(format!("{}: シートがありません", path.display())))?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| QaMatcherError::TableRead(format!("{} [{}]: {}", path.display(), sheet, e)))?;

    let mut rows = range.rows().map(|row| row.iter().map(cell_text).collect::<Vec<_>>());

    let columns = match rows.next() {
        Some(header) => header,
        None => return Ok(Table::default()),
    };

    let rows = rows
        .filter(|r| r.iter().any(|c| !c.is_empty()))
        .collect();

    Ok(Table::new(columns, rows))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        other => other.to_string(),
    }
}
