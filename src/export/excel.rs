//! 照合結果のExcel出力

use crate::error::{QaMatcherError, Result};
use qa_matcher_common::Table;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "照合結果";

/// 表をExcelファイルに書き出す（1行目はヘッダー）
pub fn generate_excel(table: &Table, output_path: &Path) -> Result<()> {
    write_workbook(table, output_path)
        .map_err(|e| QaMatcherError::ExcelGeneration(e.to_string()))
}

fn write_workbook(table: &Table, output_path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(row_idx as u32 + 1, col as u16, value)?;
            }
        }
    }

    workbook.save(output_path)?;
    Ok(())
}
