//! 누적 자산 지수(Wealth Index) 계산.
//!
//! 1 단위를 투자했을 때의 가치를 월별로 추적합니다.
//!
//! ```text
//! W_1 = 1 + r_1
//! W_t = W_{t-1} × (1 + r_t)
//! ```
//!
//! 첫 달 이전의 가치는 암묵적으로 1.0이며, 행 순서는 테이블의 시간순을 그대로 따릅니다.

use hfi_core::{MonthPeriod, ReturnsTable};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::selection::ColumnSelection;

/// 한 전략의 자산 지수 시계열.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WealthSeries {
    /// 전략 이름
    name: String,

    /// 월별 누적 가치 (인덱스와 같은 길이)
    values: Vec<Decimal>,
}

impl WealthSeries {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 마지막 누적 가치. 비어 있으면 1.0.
    pub fn final_wealth(&self) -> Decimal {
        self.values.last().copied().unwrap_or(Decimal::ONE)
    }

    fn metric_overflow(&self, metric: &'static str) -> AnalyticsError {
        AnalyticsError::MetricOverflow {
            column: self.name.clone(),
            metric,
        }
    }

    /// 총 수익률 (%).
    ///
    /// # Errors
    ///
    /// 결과가 Decimal 범위를 넘으면 [`AnalyticsError::MetricOverflow`].
    pub fn total_return(&self) -> AnalyticsResult<Decimal> {
        self.final_wealth()
            .checked_sub(Decimal::ONE)
            .and_then(|gain| gain.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| self.metric_overflow("total return"))
    }

    /// 고점 대비 최대 낙폭 (%). 0 이상의 값.
    ///
    /// 고점은 초기값 1.0에서 시작합니다.
    pub fn max_drawdown(&self) -> AnalyticsResult<Decimal> {
        let mut peak = Decimal::ONE;
        let mut max_dd = Decimal::ZERO;

        for value in &self.values {
            if *value > peak {
                peak = *value;
            }

            if peak > Decimal::ZERO {
                let dd = peak
                    .checked_sub(*value)
                    .and_then(|drop| drop.checked_div(peak))
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .ok_or_else(|| self.metric_overflow("max drawdown"))?;
                if dd > max_dd {
                    max_dd = dd;
                }
            }
        }

        Ok(max_dd)
    }

    /// 연평균 성장률 (%).
    ///
    /// CAGR = (최종가치 ^ (12 / 개월수)) - 1
    pub fn cagr(&self) -> Decimal {
        if self.values.is_empty() {
            return Decimal::ZERO;
        }

        // Decimal은 분수 지수를 지원하지 않으므로 f64 사용
        let ratio = self.final_wealth().to_f64().unwrap_or(1.0);
        if ratio <= 0.0 {
            return Decimal::from(-100);
        }

        let years = self.values.len() as f64 / 12.0;
        let cagr = ratio.powf(1.0 / years) - 1.0;

        Decimal::from_f64(cagr * 100.0).unwrap_or(Decimal::ZERO)
    }

    /// 요약 지표를 계산합니다.
    pub fn summary(&self) -> AnalyticsResult<WealthSummary> {
        Ok(WealthSummary {
            strategy: self.name.clone(),
            months: self.values.len(),
            final_wealth: self.final_wealth(),
            total_return_pct: self.total_return()?,
            max_drawdown_pct: self.max_drawdown()?,
            cagr_pct: self.cagr(),
        })
    }
}

/// 선택된 전략들의 자산 지수 (잘라낸 테이블의 행 인덱스 유지).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WealthIndex {
    index: Vec<MonthPeriod>,
    series: Vec<WealthSeries>,
}

impl WealthIndex {
    /// 행 인덱스 (시간순).
    pub fn index(&self) -> &[MonthPeriod] {
        &self.index
    }

    /// 전략별 시계열 (요청 순서).
    pub fn series(&self) -> &[WealthSeries] {
        &self.series
    }

    pub fn get(&self, name: &str) -> Option<&WealthSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// 전략별 요약 지표.
    pub fn summaries(&self) -> AnalyticsResult<Vec<WealthSummary>> {
        self.series.iter().map(WealthSeries::summary).collect()
    }
}

/// 전략별 성과 요약.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WealthSummary {
    /// 전략 이름
    pub strategy: String,

    /// 포함된 개월 수
    pub months: usize,

    /// 최종 누적 가치 (1 단위 투자 기준)
    pub final_wealth: Decimal,

    /// 총 수익률 (%)
    pub total_return_pct: Decimal,

    /// 최대 낙폭 (%)
    pub max_drawdown_pct: Decimal,

    /// CAGR (%)
    pub cagr_pct: Decimal,
}

/// 자산 지수 계산기.
#[derive(Debug, Clone, Copy, Default)]
pub struct WealthCalculator;

impl WealthCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 선택된 열마다 `(1 + r)`의 누적 곱을 계산합니다.
    ///
    /// # Errors
    ///
    /// Decimal 범위를 넘으면 [`AnalyticsError::Overflow`].
    pub fn calculate(
        &self,
        table: &ReturnsTable,
        selection: &ColumnSelection,
    ) -> AnalyticsResult<WealthIndex> {
        let mut series = Vec::with_capacity(selection.len());

        for (name, pos) in selection.iter() {
            let mut values = Vec::with_capacity(table.len());
            let mut wealth = Decimal::ONE;

            for (period, cells) in table.rows() {
                let overflow = || AnalyticsError::Overflow {
                    column: name.to_string(),
                    period: period.to_string(),
                };

                let growth = Decimal::ONE.checked_add(cells[pos]).ok_or_else(overflow)?;
                wealth = wealth.checked_mul(growth).ok_or_else(overflow)?;
                values.push(wealth);
            }

            series.push(WealthSeries {
                name: name.to_string(),
                values,
            });
        }

        debug!(
            strategies = series.len(),
            months = table.len(),
            "Wealth index computed"
        );

        Ok(WealthIndex {
            index: table.index().to_vec(),
            series,
        })
    }
}

/// 기본 계산기로 자산 지수를 계산합니다.
pub fn compute_wealth(
    table: &ReturnsTable,
    selection: &ColumnSelection,
) -> AnalyticsResult<WealthIndex> {
    WealthCalculator::new().calculate(table, selection)
}
