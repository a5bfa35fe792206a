//! 表データ
//!
//! 質問CSV・人間判定CSVなどの表を「ヘッダー + 文字列セル」で保持する。
//! CSVの読み書きはダブルクォート内のカンマ・改行・`""` エスケープに対応。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// ヘッダー付きの文字列表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// 列名と行から作成（行の長さは列数に揃える）
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 完全一致で列番号を取得
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// セル値（範囲外は空文字列）
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// 列の値を行順に返す
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        (0..self.rows.len()).map(move |row| self.cell(row, column))
    }

    /// 先頭に列を追加した新しい表を返す
    ///
    /// 同名の既存列は取り除いてから先頭に配置する。
    pub fn with_leading_columns(&self, leading: Vec<(String, Vec<String>)>) -> Self {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !leading.iter().any(|(name, _)| name == &self.columns[i]))
            .collect();

        let mut columns: Vec<String> = leading.iter().map(|(name, _)| name.clone()).collect();
        columns.extend(keep.iter().map(|&i| self.columns[i].clone()));

        let rows = (0..self.rows.len())
            .map(|row| {
                let mut out: Vec<String> = leading
                    .iter()
                    .map(|(_, values)| values.get(row).cloned().unwrap_or_default())
                    .collect();
                out.extend(keep.iter().map(|&i| self.cell(row, i).to_string()));
                out
            })
            .collect();

        Self { columns, rows }
    }

    /// CSVファイルから読み込み
    pub fn from_csv_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_csv_str(&content)
    }

    /// CSV文字列から読み込み（1行目はヘッダー）
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        let mut records = parse_csv_records(content)?.into_iter();

        let columns = match records.next() {
            Some(header) => header,
            None => return Ok(Self::default()),
        };

        let rows = records
            .filter(|r| !(r.len() == 1 && r[0].is_empty()))
            .collect();

        Ok(Self::new(columns, rows))
    }

    /// CSV文字列に変換
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        push_csv_record(&mut out, &self.columns);
        for row in &self.rows {
            push_csv_record(&mut out, row);
        }
        out
    }
}

/// CSV全体をレコードに分割
fn parse_csv_records(content: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Parse("CSVのダブルクォートが閉じられていません".into()));
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

fn push_csv_record(out: &mut String, fields: &[String]) {
    let line = fields
        .iter()
        .map(|f| escape_csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push('\n');
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_csv_simple() {
        let table = Table::from_csv_str("名前,質問\nA,好きな色は？\nB,出身は？\n").unwrap();
        assert_eq!(table.columns(), strings(&["名前", "質問"]).as_slice());
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 1), "出身は？");
    }

    #[test]
    fn test_from_csv_quoted_fields() {
        let csv = "質問,備考\n\"カンマ, 入り\",\"改行\nあり\"\n\"引用\"\"符\",x\n";
        let table = Table::from_csv_str(csv).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), "カンマ, 入り");
        assert_eq!(table.cell(0, 1), "改行\nあり");
        assert_eq!(table.cell(1, 0), "引用\"符");
    }

    #[test]
    fn test_from_csv_bom_and_crlf() {
        let table = Table::from_csv_str("\u{FEFF}質問\r\nA\r\nB").unwrap();
        assert_eq!(table.columns(), strings(&["質問"]).as_slice());
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 0), "B");
    }

    #[test]
    fn test_from_csv_short_rows_are_padded() {
        let table = Table::from_csv_str("a,b,c\n1\n").unwrap();
        assert_eq!(table.rows()[0], strings(&["1", "", ""]));
    }

    #[test]
    fn test_from_csv_blank_lines_are_skipped() {
        let table = Table::from_csv_str("a\n1\n\n2\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_csv_unterminated_quote() {
        let result = Table::from_csv_str("a\n\"unterminated\n");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_csv_empty() {
        let table = Table::from_csv_str("").unwrap();
        assert!(table.columns().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_to_csv_string_escapes() {
        let table = Table::new(
            strings(&["質問", "備考"]),
            vec![strings(&["a,b", "say \"hi\""])],
        );
        assert_eq!(table.to_csv_string(), "質問,備考\n\"a,b\",\"say \"\"hi\"\"\"\n");
        let reparsed = Table::from_csv_str(&table.to_csv_string()).unwrap();
        assert_eq!(reparsed, table);
    }

    #[test]
    fn test_with_leading_columns_replaces_existing() {
        let table = Table::new(
            strings(&["回答状況", "質問"]),
            vec![strings(&["old", "Q1"])],
        );
        let out = table.with_leading_columns(vec![
            ("回答状況".to_string(), strings(&["TRUE"])),
            ("回答方法".to_string(), strings(&["出演者"])),
        ]);
        assert_eq!(out.columns(), strings(&["回答状況", "回答方法", "質問"]).as_slice());
        assert_eq!(out.rows()[0], strings(&["TRUE", "出演者", "Q1"]));
        // 元の表は変更されない
        assert_eq!(table.cell(0, 0), "old");
    }

    #[test]
    fn test_column_values() {
        let table = Table::from_csv_str("q\nA\nB\n").unwrap();
        assert_eq!(table.column_values(0).collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
