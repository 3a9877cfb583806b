//! lexbench
//!
//! ギリシア語・ラテン語の訳語判定からベンチマークを構築し、
//! 類似度スコア付きの訳語候補を閾値ごとに評価する。

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod builder;
pub mod scanner;
pub mod evaluator;
pub mod export;
pub mod prompt;
