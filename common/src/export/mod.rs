//! CLIから使うエクスポート処理の共通部分

#[cfg(feature = "excel")]
pub mod excel_core;
