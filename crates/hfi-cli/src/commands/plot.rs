//! 자산 곡선 차트 명령어.
//!
//! # 사용 예시
//!
//! ```bash
//! # 기본 실행: edhec-hedgefundindices.csv, 2005~2019, 2년 간격, 터미널 표시
//! hfi
//!
//! # 전략과 구간 지정, SVG로 저장
//! hfi plot -s "CTA Global" -s "Short Selling" --from 2000 --to 2010 --output wealth.svg
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};

use hfi_analytics::{plot_strategies, PlotOutcome};
use hfi_core::{DateWindow, PlotConfig, DEFAULT_RETURNS_FILE};
use hfi_data::load_returns;

use crate::render::{ChartViewer, TerminalViewer};

/// 차트 명령 설정.
#[derive(Debug, Clone)]
pub struct PlotCommandConfig {
    /// 수익률 CSV 경로
    pub returns_path: PathBuf,
    /// 표시할 전략 (요청 순서)
    pub strategies: Vec<String>,
    /// 조회 구간
    pub window: DateWindow,
}

impl Default for PlotCommandConfig {
    /// 인자 없는 실행과 같은 설정.
    fn default() -> Self {
        let plot = PlotConfig::default();
        Self {
            returns_path: PathBuf::from(DEFAULT_RETURNS_FILE),
            window: plot.window().unwrap_or_default(),
            strategies: plot.strategies,
        }
    }
}

/// 인자 없는 기본 실행.
///
/// 작업 디렉토리의 `edhec-hedgefundindices.csv`를 읽어 세 전략의 2005~2019 자산 곡선을
/// 터미널에 표시합니다.
pub fn run() -> Result<()> {
    run_with(&PlotCommandConfig::default(), &mut TerminalViewer::new())?;
    Ok(())
}

/// 설정과 뷰어를 지정하여 실행합니다.
///
/// 열이 없으면 진단 메시지를 stdout에 출력하고 정상 종료합니다 (`Ok`).
/// 파일 로드 실패는 에러로 전파됩니다.
pub fn run_with(config: &PlotCommandConfig, viewer: &mut dyn ChartViewer) -> Result<PlotOutcome> {
    info!(
        path = %config.returns_path.display(),
        strategies = ?config.strategies,
        window = %config.window,
        "Plotting wealth curves"
    );

    let table = load_returns(&config.returns_path).with_context(|| {
        format!(
            "Failed to load returns from {}",
            config.returns_path.display()
        )
    })?;

    let outcome = plot_strategies(&table, &config.strategies, &config.window)?;

    match &outcome {
        PlotOutcome::Chart(chart) => {
            if let Err(e) = viewer.show(chart) {
                error!("Chart display failed: {}", e);
                return Err(e);
            }
        }
        PlotOutcome::MissingColumns(missing) => {
            println!("{}", missing);
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfi_analytics::WealthChart;
    use std::io::Write;

    /// 표시 요청을 기록만 하는 뷰어.
    #[derive(Default)]
    struct RecordingViewer {
        shown: Vec<WealthChart>,
    }

    impl ChartViewer for RecordingViewer {
        fn show(&mut self, chart: &WealthChart) -> Result<()> {
            self.shown.push(chart.clone());
            Ok(())
        }
    }

    fn write_returns(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("edhec-hedgefundindices.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "date,Global Macro,Event Driven,Long/Short Equity,CTA").unwrap();
        for year in 2004..=2006 {
            for month in 1..=12 {
                writeln!(file, "28/{:02}/{},1,0.5,-0.2,0", month, year).unwrap();
            }
        }
        path
    }

    #[test]
    fn test_default_config_matches_plain_run() {
        let config = PlotCommandConfig::default();

        assert_eq!(config.returns_path, PathBuf::from("edhec-hedgefundindices.csv"));
        assert_eq!(
            config.strategies,
            vec!["Global Macro", "Event Driven", "Long/Short Equity"]
        );
        assert_eq!(config.window, DateWindow::new(2005, 2019, 2).unwrap());
    }

    #[test]
    fn test_chart_is_shown() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotCommandConfig {
            returns_path: write_returns(&dir),
            ..PlotCommandConfig::default()
        };
        let mut viewer = RecordingViewer::default();

        let outcome = run_with(&config, &mut viewer).unwrap();

        assert!(matches!(outcome, PlotOutcome::Chart(_)));
        assert_eq!(viewer.shown.len(), 1);
        assert_eq!(viewer.shown[0].series.len(), 3);
        // 2005-01 ~ 2006-12
        assert_eq!(viewer.shown[0].series[0].points.len(), 24);
    }

    #[test]
    fn test_missing_columns_exit_normally() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotCommandConfig {
            returns_path: write_returns(&dir),
            strategies: vec!["Nonexistent Strategy".to_string()],
            ..PlotCommandConfig::default()
        };
        let mut viewer = RecordingViewer::default();

        let outcome = run_with(&config, &mut viewer).unwrap();

        assert!(matches!(outcome, PlotOutcome::MissingColumns(_)));
        assert!(viewer.shown.is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotCommandConfig {
            returns_path: dir.path().join("nope.csv"),
            ..PlotCommandConfig::default()
        };
        let mut viewer = RecordingViewer::default();

        let err = run_with(&config, &mut viewer).unwrap_err();

        let data_err = err.downcast_ref::<hfi_data::DataError>().unwrap();
        assert!(data_err.is_not_found());
        assert!(viewer.shown.is_empty());
    }
}
