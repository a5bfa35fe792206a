use clap::Parser;
use qa_matcher::{cli, config, error, export, logging, runner};
use cli::{Cli, Commands};
use config::Config;
use error::{QaMatcherError, Result};
use qa_matcher_common::parse_transcript;
use std::io::IsTerminal;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Match { questions, transcript, manual, output, format, threshold, no_ai } => {
            let config = Config::load()?;
            println!("🔎 qa-matcher - 質問回答照合\n");

            let job = runner::MatchJob {
                questions,
                transcript,
                manual,
                output: output.unwrap_or_else(|| export::default_output_path(format)),
                format,
                threshold: threshold.unwrap_or(config.threshold),
                no_ai,
                provider: cli.ai_provider,
                show_progress: std::io::stderr().is_terminal(),
            };

            // 照合はAI呼び出しで待機するためブロッキングスレッドで実行
            let summary = tokio::task::spawn_blocking(move || runner::run_match(&job, &config))
                .await
                .map_err(|e| QaMatcherError::Job(e.to_string()))??;

            println!("\n✅ 照合完了: 回答あり {}/{}件", summary.matched, summary.total);
        }

        Commands::Parse { transcript, output } => {
            let parsed = parse_transcript(&transcript)?;
            let json = serde_json::to_string_pretty(&parsed)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ {}件の発言を保存: {}", parsed.len(), path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Config { set_api_key, show } => {
            // 不正な値があっても確認・修復できるよう検証しない
            let mut config = Config::load_unchecked()?;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  レート制限: {}回/分", config.max_requests_per_minute);
                println!("  閾値: {}", config.threshold);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
                if let Err(e) = config.validate() {
                    println!("⚠ {}", e);
                }
            }
        }
    }

    Ok(())
}
