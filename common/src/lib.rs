//! lexbench Common Library
//!
//! ベンチマーク構築と評価で共有される型・正規化・集計ロジック

pub mod types;
pub mod error;
pub mod betacode;
pub mod normalize;
pub mod table;
pub mod benchmark;
pub mod candidates;
pub mod evaluation;
pub mod export;

pub use types::{CandidateTranslation, EvaluationRow, Lang, Outcome, WordPairJudgment};
pub use error::{Error, Result};
pub use normalize::{is_greek, nfkc, Orthography};
pub use table::{reshape, RawTable};
pub use benchmark::{BenchmarkTable, MergeReport, SourceKind, SourceMeta};
pub use candidates::parse_candidates;
pub use evaluation::{evaluate, CutoffRange, Evaluation, EvaluationOptions, RecallTotal};
