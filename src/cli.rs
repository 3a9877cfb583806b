use crate::fetch::Source;
use clap::{Parser, Subcommand};
use lexbench_common::Orthography;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lexbench")]
#[command(about = "ギリシア語・ラテン語対訳辞書のベンチマーク構築・評価ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（省略時は ~/.config/lexbench/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 判定データを取得してベンチマークCSVを構築
    Build {
        /// 出力CSV（省略時は設定の benchmark_path）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ソース KIND=LOCATION[@PRIORITY]（指定時は設定のソースを置き換え）
        #[arg(short, long = "source")]
        sources: Vec<Source>,

        /// 表記の統一方式 (nfkc/tesserae)
        #[arg(long)]
        orthography: Option<Orthography>,
    },

    /// 訳語候補を評価して適合率・再現率のグラフを出力
    Evaluate {
        /// 訳語候補ファイルまたはディレクトリ
        candidates: Option<PathBuf>,

        /// ベンチマークCSV
        #[arg(short, long)]
        benchmark: Option<PathBuf>,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (plot/csv/excel/all)
        #[arg(short, long, default_value = "plot")]
        format: ExportFormat,

        /// 閾値の開始値
        #[arg(long)]
        start: Option<f64>,

        /// 閾値の終了値
        #[arg(long)]
        end: Option<f64>,

        /// 閾値の刻み
        #[arg(long)]
        step: Option<f64>,

        /// F値の重み β²
        #[arg(long)]
        beta_squared: Option<f64>,

        /// 評価する候補の順位
        #[arg(long, default_value = "1")]
        rank: u8,

        /// 再現率の分母（省略時はベンチマークから算出）
        #[arg(long)]
        recall_total: Option<usize>,

        /// 表記の統一方式 (nfkc/tesserae)
        #[arg(long)]
        orthography: Option<Orthography>,

        /// ベンチマークを再構築
        #[arg(long)]
        rebuild: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 訳語候補ファイルを設定
        #[arg(long)]
        set_candidates: Option<PathBuf>,

        /// ソースを追加 KIND=LOCATION[@PRIORITY]
        #[arg(long)]
        add_source: Vec<Source>,

        /// ソースをすべて削除
        #[arg(long)]
        clear_sources: bool,
    },

    /// ベンチマーク（キャッシュ）管理
    Cache {
        /// ベンチマークとマニフェストを削除
        #[arg(long)]
        clear: bool,

        /// 対象のベンチマークCSV
        #[arg(short, long)]
        benchmark: Option<PathBuf>,

        /// 情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// グラフのみ
    #[default]
    Plot,
    Csv,
    Excel,
    All,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plot" | "svg" => Ok(ExportFormat::Plot),
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use plot, csv, excel, or all", s)),
        }
    }
}
