//! QA Matcher Common Library
//!
//! 質問照合のコアロジック（CLIや他のフロントエンドから共有）:
//! 文字起こしパース、テキスト正規化、チャンク照合、AI判定、レート制限、照合エンジン

pub mod types;
pub mod error;
pub mod text;
pub mod rate_limiter;
pub mod transcript;
pub mod chunk_matcher;
pub mod prompts;
pub mod classifier;
pub mod table;
pub mod schema;
pub mod observer;
pub mod engine;

pub use types::{MatchResult, Utterance, METHOD_OPERATOR, METHOD_PERFORMER};
pub use error::{Error, Result};
pub use text::{normalize_text, strip_emoji};
pub use rate_limiter::RateLimiter;
pub use transcript::{parse_transcript, parse_transcript_str, ParseReport, Transcript};
pub use chunk_matcher::{ChunkMatcher, MatchTier, DEFAULT_THRESHOLD};
pub use classifier::{AiFallbackClassifier, ClassifierClient, FallbackClassifier, Verdict};
pub use table::Table;
pub use schema::{ColumnRule, ColumnSpec};
pub use observer::{EvidenceSource, MatchEvent, MatchObserver, NullObserver};
pub use engine::{MatchEngine, MatchOutput, MatchSummary};
