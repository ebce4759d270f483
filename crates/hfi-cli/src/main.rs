//! 헤지펀드 전략 자산 곡선 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 기본 실행 (plot과 동일)
//! hfi
//!
//! # 전략과 구간 지정
//! hfi plot -s "Global Macro" -s "CTA Global" --from 2000 --to 2019 --step 5
//!
//! # 이미지로 저장
//! hfi plot --output wealth.png
//!
//! # 열 목록 / 성과 요약
//! hfi columns
//! hfi summary --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use hfi_cli::commands::columns::list_columns;
use hfi_cli::commands::plot::{run_with, PlotCommandConfig};
use hfi_cli::commands::summary::{print_summary, OutputFormat, SummaryConfig};
use hfi_cli::render::{ChartViewer, ImageExporter, TerminalViewer};
use hfi_core::{init_logging, AppConfig, DateWindow, LogConfig, LogFormat, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "hfi")]
#[command(about = "Hedge fund index wealth curves - 전략별 누적 자산 곡선", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (없으면 기본값 사용)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// 데이터 구간 인자.
#[derive(clap::Args, Debug, Clone, Default)]
struct WindowArgs {
    /// 시작 연도 (1월부터 포함)
    #[arg(long)]
    from: Option<i32>,

    /// 종료 연도 (12월까지 포함)
    #[arg(long)]
    to: Option<i32>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 자산 곡선 차트 표시 (기본 명령)
    Plot {
        /// 수익률 CSV 파일
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 전략 이름 (여러 번 지정 가능)
        #[arg(short, long = "strategy")]
        strategies: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,

        /// X축 눈금 간격 (연)
        #[arg(long)]
        step: Option<u32>,

        /// 이미지 저장 경로 (.svg, .png). 지정하지 않으면 터미널에 표시
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 파일의 전략 열 목록 보기
    Columns {
        /// 수익률 CSV 파일
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// 전략별 성과 요약
    Summary {
        /// 수익률 CSV 파일
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 전략 이름 (여러 번 지정 가능)
        #[arg(short, long = "strategy")]
        strategies: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },
}

/// 설정 값 위에 CLI 인자를 덮어씁니다.
fn resolve_window(
    config: &AppConfig,
    window: &WindowArgs,
    step: Option<u32>,
) -> Result<DateWindow> {
    let window = DateWindow::new(
        window.from.unwrap_or(config.plot.start_year),
        window.to.unwrap_or(config.plot.end_year),
        step.unwrap_or(config.plot.step),
    )?;
    Ok(window)
}

fn resolve_strategies(config: &AppConfig, strategies: Vec<String>) -> Vec<String> {
    if strategies.is_empty() {
        config.plot.strategies.clone()
    } else {
        strategies
    }
}

fn resolve_file(config: &AppConfig, file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(&config.data.returns_path))
}

fn init_tracing(cli: &Cli, config: &AppConfig) -> Result<()> {
    let mut log_config = LogConfig::from(&config.logging);
    if let Some(level) = &cli.log_level {
        log_config.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        log_config.format = format.parse::<LogFormat>().map_err(|e| anyhow::anyhow!(e))?;
    }

    init_logging(log_config).map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    init_tracing(&cli, &config)?;

    let command = cli.command.unwrap_or(Commands::Plot {
        file: None,
        strategies: Vec::new(),
        window: WindowArgs::default(),
        step: None,
        output: None,
    });

    match command {
        Commands::Plot {
            file,
            strategies,
            window,
            step,
            output,
        } => {
            let plot_config = PlotCommandConfig {
                returns_path: resolve_file(&config, file),
                strategies: resolve_strategies(&config, strategies),
                window: resolve_window(&config, &window, step)?,
            };

            let mut viewer: Box<dyn ChartViewer> = match &output {
                Some(path) => Box::new(ImageExporter::new(path)?),
                None => Box::new(TerminalViewer::new()),
            };

            match run_with(&plot_config, viewer.as_mut()) {
                Ok(_) => {
                    if let Some(path) = output {
                        info!("✅ Chart saved to {}", path.display());
                        println!("저장 위치: {}", path.display());
                    }
                }
                Err(e) => {
                    error!("Plot failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Columns { file } => {
            let path = resolve_file(&config, file);
            list_columns(&path)?;
        }

        Commands::Summary {
            file,
            strategies,
            window,
            json,
        } => {
            let summary_config = SummaryConfig {
                returns_path: resolve_file(&config, file),
                strategies: resolve_strategies(&config, strategies),
                window: resolve_window(&config, &window, None)?,
                format: if json {
                    OutputFormat::Json
                } else {
                    OutputFormat::Table
                },
            };

            print_summary(&summary_config)?;
        }
    }

    Ok(())
}
