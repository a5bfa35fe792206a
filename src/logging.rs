//! ログ初期化と照合イベントの出力

use indicatif::{ProgressBar, ProgressStyle};
use qa_matcher_common::{MatchEvent, MatchObserver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// tracing を初期化（RUST_LOG 優先、未設定なら info / -v で debug）
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "qa_matcher=debug,qa_matcher_common=debug"
    } else {
        "info"
    };

    // テストなどで二重初期化された場合は無視
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// 照合イベントを tracing に流し、進捗バーを更新する
pub struct TracingObserver {
    progress: ProgressBar,
}

impl TracingObserver {
    pub fn new() -> Self {
        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::with_template("{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        progress.set_message("照合中");
        Self { progress }
    }

    /// 進捗バーを表示しない（パイプ出力・テスト用）
    pub fn hidden() -> Self {
        Self {
            progress: ProgressBar::hidden(),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchObserver for TracingObserver {
    fn on_event(&self, event: &MatchEvent) {
        match event {
            MatchEvent::ColumnResolved { field, column } => {
                tracing::info!(field = %field, column = %column, "列を解決");
            }
            MatchEvent::ColumnMissing { field } => {
                tracing::warn!(field = %field, "列が見つかりません（既定値を使用）");
            }
            MatchEvent::ManualIndexed { answered_rows, unique_questions } => {
                tracing::info!(answered_rows, unique_questions, "人間判定CSVの回答済み質問を索引化");
            }
            MatchEvent::TieBreakCandidates { count } => {
                tracing::info!(count, "未回答・回答方法空白の質問を文字起こしで再照合");
            }
            MatchEvent::QuestionMatched { row, source, tier, question, evidence } => {
                let tier = tier.map(|t| t.to_string()).unwrap_or_else(|| "-".into());
                self.progress.suspend(|| {
                    tracing::debug!(
                        row,
                        source = %source,
                        tier = %tier,
                        question = %preview(question),
                        evidence = %preview(evidence),
                        "回答根拠あり"
                    );
                });
            }
            MatchEvent::QuestionProcessed { row, total } => {
                self.progress.set_length(*total as u64);
                self.progress.set_position(*row as u64 + 1);
            }
            MatchEvent::Finished { matched, total } => {
                self.progress.finish_and_clear();
                tracing::info!(matched, total, "照合完了");
            }
        }
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(50).collect();
    if text.chars().count() > 50 {
        out.push('…');
    }
    out
}
