//! 헤지펀드 전략 자산 곡선 분석.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 요청 전략 열 검증 (`validate_columns`)
//! - 조회 구간 자르기 (`slice_window`)
//! - 누적 자산 지수 계산 (`WealthCalculator`)
//! - 차트 렌더링 컨텍스트 (`WealthChart`)
//!
//! 전체 흐름은 [`plot_strategies`]가 묶습니다.

pub mod chart;
pub mod error;
pub mod pipeline;
pub mod selection;
pub mod wealth;
pub mod window;

pub use chart::{
    ChartSeries, GridStyle, SeriesColor, Tick, WealthChart, CANVAS_SIZE, CHART_TITLE, PALETTE,
    X_LABEL, Y_LABEL,
};
pub use error::{AnalyticsError, AnalyticsResult};
pub use pipeline::{plot_strategies, PlotOutcome};
pub use selection::{validate_columns, ColumnSelection, MissingColumns};
pub use wealth::{compute_wealth, WealthCalculator, WealthIndex, WealthSeries, WealthSummary};
pub use window::slice_window;
