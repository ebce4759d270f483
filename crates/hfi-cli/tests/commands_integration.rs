//! 명령어 통합 테스트 (파일 → 로드 → 분석 → 출력).

use std::io::Write;
use std::path::PathBuf;

use hfi_analytics::{PlotOutcome, WealthChart};
use hfi_cli::commands::columns::list_columns;
use hfi_cli::commands::plot::{run_with, PlotCommandConfig};
use hfi_cli::commands::summary::{summarize, OutputFormat, SummaryConfig};
use hfi_cli::render::ChartViewer;
use hfi_core::DateWindow;
use rust_decimal_macros::dec;

struct CountingViewer(usize);

impl ChartViewer for CountingViewer {
    fn show(&mut self, _chart: &WealthChart) -> anyhow::Result<()> {
        self.0 += 1;
        Ok(())
    }
}

/// 1997-01 ~ 2019-12, 모든 전략 매월 1%.
fn write_edhec_like(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("edhec-hedgefundindices.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "date,Convertible Arbitrage,Event Driven,Global Macro,Long/Short Equity"
    )
    .unwrap();
    for year in 1997..=2019 {
        for month in 1..=12 {
            writeln!(file, "28/{:02}/{},1,1,1,1", month, year).unwrap();
        }
    }
    path
}

#[test]
fn plain_plot_flow_over_default_window() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlotCommandConfig {
        returns_path: write_edhec_like(&dir),
        ..PlotCommandConfig::default()
    };
    let mut viewer = CountingViewer(0);

    let outcome = run_with(&config, &mut viewer).unwrap();
    let chart = outcome.chart().unwrap();

    assert_eq!(viewer.0, 1);
    assert_eq!(chart.series.len(), 3);
    assert!(chart.series.iter().all(|s| s.points.len() == 180));

    let years: Vec<&str> = chart.x_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(
        years,
        vec!["2005", "2007", "2009", "2011", "2013", "2015", "2017", "2019"]
    );
}

#[test]
fn missing_strategy_skips_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlotCommandConfig {
        returns_path: write_edhec_like(&dir),
        strategies: vec!["Global Macro".to_string(), "Nonexistent Strategy".to_string()],
        ..PlotCommandConfig::default()
    };
    let mut viewer = CountingViewer(0);

    let outcome = run_with(&config, &mut viewer).unwrap();

    match outcome {
        PlotOutcome::MissingColumns(missing) => {
            assert_eq!(missing.missing, vec!["Nonexistent Strategy"]);
            assert_eq!(missing.available.len(), 4);
        }
        PlotOutcome::Chart(_) => panic!("chart must not be built"),
    }
    assert_eq!(viewer.0, 0);
}

#[test]
fn summary_and_columns_share_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_edhec_like(&dir);

    assert_eq!(list_columns(&path).unwrap(), 4);

    let summaries = summarize(&SummaryConfig {
        returns_path: path,
        strategies: vec!["Event Driven".to_string()],
        window: DateWindow::new(2019, 2019, 1).unwrap(),
        format: OutputFormat::Json,
    })
    .unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].months, 12);
    assert_eq!(summaries[0].max_drawdown_pct, dec!(0));
    assert!(summaries[0].final_wealth > dec!(1.1268) && summaries[0].final_wealth < dec!(1.1269));
}
