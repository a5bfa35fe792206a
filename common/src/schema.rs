//! 列名解決
//!
//! 外部CSVの列名の揺れに対応するため、論理フィールドごとに
//! 優先順位付きの探索ルールを定義し、最初に見つかった列を使う。

use crate::error::{Error, Result};

/// 列探索ルール（前に書いたものが優先）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRule {
    /// 候補名の順に完全一致で探す
    Exact(&'static [&'static str]),
    /// 前後空白を除いた列名が一致する最初の列
    Trimmed(&'static str),
    /// 前後空白を除いた列名に含まれる最初の列
    Contains(&'static str),
    /// 前後空白を除いた列名が候補のいずれかと一致する最初の列（列順）
    AnyOf(&'static [&'static str]),
}

impl ColumnRule {
    fn find(&self, columns: &[String]) -> Option<usize> {
        match self {
            ColumnRule::Exact(names) => names
                .iter()
                .find_map(|name| columns.iter().position(|c| c == name)),
            ColumnRule::Trimmed(name) => columns.iter().position(|c| c.trim() == *name),
            ColumnRule::Contains(part) => columns.iter().position(|c| c.trim().contains(part)),
            ColumnRule::AnyOf(names) => columns
                .iter()
                .position(|c| names.iter().any(|n| *n == c.trim())),
        }
    }

    fn candidates(&self) -> Vec<String> {
        match self {
            ColumnRule::Exact(names) | ColumnRule::AnyOf(names) => {
                names.iter().map(|n| n.to_string()).collect()
            }
            ColumnRule::Trimmed(name) => vec![name.to_string()],
            ColumnRule::Contains(part) => vec![format!("*{}*", part)],
        }
    }
}

/// 論理フィールドと探索ルール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub rules: &'static [ColumnRule],
}

/// 質問CSVの質問テキスト列
pub const QUESTION_TEXT: ColumnSpec = ColumnSpec {
    field: "質問テキスト",
    rules: &[ColumnRule::Exact(&["original_text", "質問", "コメント", "text"])],
};

/// 人間判定CSVの質問列
pub const MANUAL_QUESTION: ColumnSpec = ColumnSpec {
    field: "人間判定CSVの「質問」",
    rules: &[
        ColumnRule::Trimmed("質問"),
        ColumnRule::Contains("質問"),
        ColumnRule::AnyOf(&["original_text", "コメント", "text"]),
    ],
};

/// 人間判定CSVの回答済列
pub const MANUAL_ANSWERED: ColumnSpec = ColumnSpec {
    field: "回答済",
    rules: &[ColumnRule::Exact(&["回答済み", "回答済", "answered", "回答状況"])],
};

/// 人間判定CSVの回答方法列
pub const MANUAL_METHOD: ColumnSpec = ColumnSpec {
    field: "回答方法",
    rules: &[ColumnRule::Exact(&["回答方法", "answer_method", "方法"])],
};

impl ColumnSpec {
    /// 列を探す（見つからなければ `None`）
    pub fn find(&self, columns: &[String]) -> Option<usize> {
        self.rules.iter().find_map(|rule| rule.find(columns))
    }

    /// 列を解決する
    ///
    /// 見つからない場合は試した候補と実際の列名を含むエラーを返す。
    pub fn resolve(&self, columns: &[String]) -> Result<usize> {
        self.find(columns).ok_or_else(|| Error::ColumnNotFound {
            field: self.field.to_string(),
            candidates: self.rules.iter().flat_map(|r| r.candidates()).collect(),
            available: columns.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_question_text_uses_alias_order() {
        // 列順ではなく候補順で優先
        let columns = cols(&["text", "コメント", "original_text"]);
        assert_eq!(QUESTION_TEXT.resolve(&columns).unwrap(), 2);
    }

    #[test]
    fn test_question_text_fallback_alias() {
        let columns = cols(&["id", "text"]);
        assert_eq!(QUESTION_TEXT.resolve(&columns).unwrap(), 1);
    }

    #[test]
    fn test_manual_question_exact_over_substring() {
        let columns = cols(&["質問者", " 質問 ", "text"]);
        assert_eq!(MANUAL_QUESTION.resolve(&columns).unwrap(), 1);
    }

    #[test]
    fn test_manual_question_substring_over_alias() {
        let columns = cols(&["text", "視聴者の質問"]);
        assert_eq!(MANUAL_QUESTION.resolve(&columns).unwrap(), 1);
    }

    #[test]
    fn test_manual_question_alias_in_column_order() {
        let columns = cols(&["id", "text ", "コメント"]);
        assert_eq!(MANUAL_QUESTION.resolve(&columns).unwrap(), 1);
    }

    #[test]
    fn test_not_found_enumerates_columns() {
        let columns = cols(&["名前", "日時"]);
        let err = MANUAL_QUESTION.resolve(&columns).unwrap_err();
        match err {
            Error::ColumnNotFound { field, candidates, available } => {
                assert!(field.contains("質問"));
                assert!(candidates.contains(&"*質問*".to_string()));
                assert!(candidates.contains(&"original_text".to_string()));
                assert_eq!(available, columns);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_optional_columns() {
        let columns = cols(&["質問", "回答済", "方法"]);
        assert_eq!(MANUAL_ANSWERED.find(&columns), Some(1));
        assert_eq!(MANUAL_METHOD.find(&columns), Some(2));
        assert_eq!(MANUAL_METHOD.find(&cols(&["質問"])), None);
    }
}
