use anyhow::Context;
use clap::Parser;
use lexbench::{builder, cli, config, evaluator, prompt};
use builder::{BenchmarkManifest, BuildOptions};
use cli::{Cli, Commands};
use config::Config;
use lexbench_common::{CutoffRange, EvaluationOptions, RecallTotal};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "lexbench=debug,lexbench_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)
        .with_context(|| format!("設定を読み込めません: {}", config_path.display()))?;

    match cli.command {
        Commands::Build { output, sources, orthography } => {
            println!("📚 lexbench - ベンチマーク構築\n");

            let sources = if sources.is_empty() { config.sources.clone() } else { sources };
            let output = output.unwrap_or_else(|| config.benchmark_path.clone());
            let options = BuildOptions {
                orthography: orthography.unwrap_or(config.orthography),
                timeout: Duration::from_secs(config.timeout_seconds),
                verbose: cli.verbose,
            };

            println!("[1/2] 判定データを取得中... ({}件のソース)", sources.len());
            let summary = builder::build_benchmark(&sources, &output, &options).await?;
            println!("✔ {}行を読み込み\n", summary.report.input_rows);

            println!("[2/2] ベンチマークを保存");
            println!("  未判定で除外: {}", summary.report.unjudged);
            println!("  重複: {} / 判定の食い違い: {}", summary.report.duplicates, summary.report.conflicts);
            println!("  ペア数: {}（正解 {}）", summary.table.len(), summary.table.valid_count());
            println!("✔ 保存: {}", output.display());

            println!("\n✅ 構築完了");
        }

        Commands::Evaluate {
            candidates,
            benchmark,
            output,
            format,
            start,
            end,
            step,
            beta_squared,
            rank,
            recall_total,
            orthography,
            rebuild,
        } => {
            println!("📈 lexbench - 訳語候補の評価\n");

            let orthography = orthography.unwrap_or(config.orthography);
            let benchmark_path = benchmark.unwrap_or_else(|| config.benchmark_path.clone());

            // 1. ベンチマーク
            println!("[1/3] ベンチマークを読み込み中...");
            let build_options = BuildOptions {
                orthography,
                timeout: Duration::from_secs(config.timeout_seconds),
                verbose: cli.verbose,
            };
            let table = builder::ensure_benchmark(&config.sources, &benchmark_path, &build_options, rebuild)
                .await
                .with_context(|| format!("ベンチマークを用意できません: {}", benchmark_path.display()))?;
            println!("✔ {}ペア（正解 {}）\n", table.len(), table.valid_count());

            // 2. 候補ファイル
            println!("[2/3] 訳語候補を指定...");
            let candidates_path = prompt::resolve_candidates_path(candidates, config.candidates_path.clone())?;
            println!("✔ {}\n", candidates_path.display());

            // 3. 評価・出力
            println!("[3/3] 評価中...");
            let options = EvaluationOptions {
                range: CutoffRange {
                    start: start.unwrap_or(config.cutoff.start),
                    end: end.unwrap_or(config.cutoff.end),
                    step: step.unwrap_or(config.cutoff.step),
                },
                beta_squared: beta_squared.unwrap_or(config.beta_squared),
                rank,
                recall_total: match recall_total.or(config.recall_total) {
                    Some(n) => RecallTotal::Fixed(n),
                    None => RecallTotal::Computed,
                },
            };
            let job = evaluator::EvaluationJob {
                candidates: candidates_path,
                options,
                orthography,
                format,
                output_dir: evaluator::output_dir_or(output, &config.output_dir),
            };
            evaluator::run_evaluation(&table, &job)?;

            println!("\n✅ 評価完了");
        }

        Commands::Config { show, set_candidates, add_source, clear_sources } => {
            let mut config = config;
            let mut modified = false;

            if clear_sources {
                config.sources.clear();
                modified = true;
                println!("✔ ソースをすべて削除しました");
            }

            for source in add_source {
                println!("✔ ソースを追加: {}", source);
                config.add_source(source);
                modified = true;
            }

            if let Some(path) = set_candidates {
                println!("✔ 訳語候補ファイルを設定: {}", path.display());
                config.candidates_path = Some(path);
                modified = true;
            }

            if modified {
                config.save_to(&config_path)?;
            }

            if show || !modified {
                println!("設定 ({}):", config_path.display());
                println!("  ベンチマーク: {}", config.benchmark_path.display());
                println!(
                    "  訳語候補: {}",
                    config.candidates_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "未設定".into())
                );
                println!("  出力先: {}", config.output_dir.display());
                println!("  閾値: {:.2}〜{:.2}（刻み {}）", config.cutoff.start, config.cutoff.end, config.cutoff.step);
                println!("  β²: {}", config.beta_squared);
                println!(
                    "  再現率の分母: {}",
                    config.recall_total.map(|n| n.to_string()).unwrap_or_else(|| "ベンチマークから算出".into())
                );
                println!("  表記: {}", config.orthography);
                println!("  ソース:");
                if config.sources.is_empty() {
                    println!("    (なし)");
                }
                for source in &config.sources {
                    println!("    {}", source);
                }
            }
        }

        Commands::Cache { clear, benchmark, info } => {
            let target = benchmark.unwrap_or_else(|| config.benchmark_path.clone());

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if target.exists() {
                    println!("ベンチマーク情報:");
                    println!("  パス: {}", target.display());
                    if let Ok(meta) = std::fs::metadata(&target) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                    match BenchmarkManifest::load(&target) {
                        Some(manifest) => {
                            let bytes = std::fs::read(&target)?;
                            println!("  構築日時: {}", manifest.built_at);
                            println!("  ペア数: {}（正解 {}）", manifest.rows, manifest.valid_rows);
                            println!("  表記: {}", manifest.orthography);
                            println!("  SHA-256: {}{}", manifest.sha256, if manifest.matches(&bytes) { "" } else { "（不一致）" });
                            for source in &manifest.sources {
                                println!("    {}={} @{}: {}行", source.kind, source.location, source.priority, source.rows);
                            }
                        }
                        None => println!("  マニフェストなし"),
                    }
                } else {
                    println!("ベンチマークが存在しません: {}", target.display());
                }
            }

            if clear {
                match BenchmarkManifest::clear(&target) {
                    Ok(true) => println!("✔ ベンチマークを削除しました: {}", target.display()),
                    Ok(false) => println!("ベンチマークが存在しません"),
                    Err(e) => println!("削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}
