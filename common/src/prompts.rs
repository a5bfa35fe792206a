//! プロンプト生成モジュール
//!
//! AI判定（質問が回答されたか）用のプロンプトを生成する。

/// AI判定の温度（一貫性重視）
pub const MATCH_TEMPERATURE: f32 = 0.1;

/// AI判定の最大トークン数（YES/NOのみ）
pub const MATCH_MAX_TOKENS: u32 = 10;

/// 質問・回答照合プロンプト生成
///
/// # Arguments
/// * `question` - 視聴者の質問テキスト
/// * `answer` - 出演者の発言または判定済み質問テキスト
///
/// # Returns
/// YES/NOのみを返させるプロンプト文字列
pub fn build_match_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"あなたはライブ配信のチャット質問を整理するアシスタントです。
次の「発言」が「質問」に答えている、または同じ質問を指しているかを判定してください。

## 質問
{question}

## 発言
{answer}

## 出力形式
回答している場合は YES、していない場合は NO とだけ出力してください。"#
    )
}
