//! `match` サブコマンドの同期処理本体

use crate::ai_provider::AiProvider;
use crate::classifier;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{QaMatcherError, Result};
use crate::export;
use crate::logging::TracingObserver;
use crate::table_io::load_table;
use qa_matcher_common::{parse_transcript, ChunkMatcher, MatchEngine, MatchObserver, MatchSummary};
use std::path::PathBuf;
use std::sync::Arc;

/// 照合ジョブの入力
#[derive(Debug, Clone)]
pub struct MatchJob {
    pub questions: PathBuf,
    pub transcript: Option<PathBuf>,
    pub manual: Option<PathBuf>,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub threshold: f64,
    pub no_ai: bool,
    pub provider: AiProvider,
    pub show_progress: bool,
}

impl MatchJob {
    pub fn validate(&self) -> Result<()> {
        if self.transcript.is_none() && self.manual.is_none() {
            return Err(QaMatcherError::Config(
                "--transcript か --manual のどちらかを指定してください".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(QaMatcherError::Config(format!(
                "閾値は 0.0〜1.0 で指定してください: {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// 照合を実行して結果を書き出す（ブロッキング処理）
pub fn run_match(job: &MatchJob, config: &Config) -> Result<MatchSummary> {
    job.validate()?;

    println!("[1/4] 表を読み込み中...");
    let questions = load_table(&job.questions)?;
    println!("✔ 質問 {}件\n", questions.len());

    let manual = job.manual.as_deref().map(load_table).transpose()?;

    println!("[2/4] 文字起こしを解析中...");
    let transcript = job.transcript.as_deref().map(parse_transcript).transpose()?;
    match &transcript {
        Some(t) => println!(
            "✔ 発言 {}件（破棄ブロック {}件）\n",
            t.len(),
            t.report.skipped_blocks
        ),
        None => println!("- 文字起こしなし\n"),
    }

    println!("[3/4] 照合中...");
    let fallback = classifier::build_fallback(job.provider, config, job.no_ai)?;
    let mut matcher = ChunkMatcher::new(job.threshold);
    if let Some(fallback) = fallback {
        matcher = matcher.with_fallback(fallback);
    }

    let observer: Arc<dyn MatchObserver> = if job.show_progress {
        Arc::new(TracingObserver::new())
    } else {
        Arc::new(TracingObserver::hidden())
    };
    let engine = MatchEngine::new(matcher).with_observer(observer);

    let utterances = transcript.as_ref().map(|t| t.utterances.as_slice());
    let output = if let Some(manual) = &manual {
        engine.match_questions_with_manual(&questions, manual, utterances)?
    } else if let Some(utterances) = utterances {
        engine.match_questions_with_transcript(&questions, utterances)?
    } else {
        return Err(QaMatcherError::Config("照合の根拠となる入力がありません".into()));
    };
    println!(
        "✔ 回答あり {}/{}件（人間判定 {}件、文字起こし {}件）\n",
        output.summary.matched,
        output.summary.total,
        output.summary.manual_exact + output.summary.manual_fuzzy,
        output.summary.transcript + output.summary.tie_break,
    );

    println!("[4/4] 結果を保存中...");
    export::export_output(&output, job.format, &job.output)?;
    println!("✔ 結果を保存: {}", job.output.display());

    Ok(output.summary)
}
