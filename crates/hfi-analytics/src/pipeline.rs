//! 검증 → 구간 자르기 → 자산 지수 → 차트 구성.

use hfi_core::{DateWindow, ReturnsTable};
use tracing::{info, warn};

use crate::chart::WealthChart;
use crate::error::AnalyticsResult;
use crate::selection::{validate_columns, MissingColumns};
use crate::wealth::compute_wealth;
use crate::window::slice_window;

/// 렌더링 준비 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotOutcome {
    /// 그릴 차트
    Chart(WealthChart),
    /// 요청한 열이 없음 (아무것도 그리지 않음)
    MissingColumns(MissingColumns),
}

impl PlotOutcome {
    pub fn chart(&self) -> Option<&WealthChart> {
        match self {
            PlotOutcome::Chart(chart) => Some(chart),
            PlotOutcome::MissingColumns(_) => None,
        }
    }
}

/// 선택한 전략의 자산 곡선 차트를 준비합니다.
///
/// 열이 없으면 `PlotOutcome::MissingColumns`를 반환하며 차트는 만들지 않습니다.
/// 구간에 데이터가 없으면 경고를 남기고 선이 없는 차트를 반환합니다.
pub fn plot_strategies<S: AsRef<str>>(
    table: &ReturnsTable,
    strategies: &[S],
    window: &DateWindow,
) -> AnalyticsResult<PlotOutcome> {
    let selection = match validate_columns(table, strategies) {
        Ok(selection) => selection,
        Err(missing) => {
            warn!(missing = ?missing.missing, "Requested columns not found");
            return Ok(PlotOutcome::MissingColumns(missing));
        }
    };

    let sliced = slice_window(table, window);
    if sliced.is_empty() {
        warn!(
            window = %window,
            coverage = ?table.coverage().map(|(a, b)| format!("{} ~ {}", a, b)),
            "No data in window; chart will have no lines"
        );
    }

    let wealth = compute_wealth(&sliced, &selection)?;
    let chart = WealthChart::build(&wealth, window);

    info!(
        strategies = selection.len(),
        months = wealth.len(),
        "Chart prepared"
    );

    Ok(PlotOutcome::Chart(chart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfi_core::MonthPeriod;
    use rust_decimal::Decimal;

    fn table() -> ReturnsTable {
        let mut period = MonthPeriod::new(2010, 1).unwrap();
        let mut rows = Vec::new();
        for _ in 0..24 {
            rows.push((period, vec![Decimal::ZERO, Decimal::ONE / Decimal::ONE_HUNDRED]));
            period = period.succ();
        }
        ReturnsTable::new(vec!["CTA".to_string(), "Macro".to_string()], rows).unwrap()
    }

    #[test]
    fn test_chart_outcome() {
        let window = DateWindow::new(2010, 2011, 1).unwrap();
        let outcome = plot_strategies(&table(), &["Macro"], &window).unwrap();

        let chart = outcome.chart().unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points.len(), 24);
    }

    #[test]
    fn test_missing_outcome_draws_nothing() {
        let window = DateWindow::default();
        let outcome = plot_strategies(&table(), &["Macro", "Nope"], &window).unwrap();

        match outcome {
            PlotOutcome::MissingColumns(missing) => {
                assert_eq!(missing.missing, vec!["Nope"]);
                assert_eq!(missing.available, vec!["CTA", "Macro"]);
            }
            PlotOutcome::Chart(_) => panic!("chart must not be built"),
        }
    }

    #[test]
    fn test_empty_window_still_charts() {
        let window = DateWindow::new(1990, 1995, 1).unwrap();
        let outcome = plot_strategies(&table(), &["CTA"], &window).unwrap();

        let chart = outcome.chart().unwrap();
        assert!(!chart.has_data());
        assert_eq!(chart.x_ticks.len(), 6);
    }
}
