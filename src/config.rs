use crate::error::{LexBenchError, Result};
use crate::fetch::Source;
use lexbench_common::{CutoffRange, Orthography};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 判定データのソース（読み込み順）
    pub sources: Vec<Source>,
    pub benchmark_path: PathBuf,
    pub candidates_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub cutoff: CutoffRange,
    pub beta_squared: f64,
    /// 再現率の分母（None = ベンチマークから算出）
    pub recall_total: Option<usize>,
    pub orthography: Orthography,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// 既定の場所から読み込み（なければ既定値）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "設定を読み込みました");
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LexBenchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("lexbench").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            sources: Vec::new(),
            benchmark_path: PathBuf::from("benchmark.csv"),
            candidates_path: None,
            output_dir: PathBuf::from("."),
            cutoff: CutoffRange::default(),
            beta_squared: 36.0,  // 再現率を大きく重視
            recall_total: None,
            orthography: Orthography::Nfkc,
            timeout_seconds: 60,
        }
    }

    /// ソースを追加（同じ場所のものは置き換え）
    pub fn add_source(&mut self, source: Source) {
        self.sources.retain(|s| s.location != source.location);
        self.sources.push(source);
    }
}
