//! 분석 모듈 에러 타입.

use hfi_core::CoreError;
use thiserror::Error;

/// 자산 지수 계산 및 차트 구성에서 발생할 수 있는 에러.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Decimal 곱셈 오버플로
    #[error("Wealth overflow in '{column}' at {period}")]
    Overflow { column: String, period: String },

    /// 요약 지표 계산 오버플로
    #[error("{metric} overflow in '{column}'")]
    MetricOverflow {
        column: String,
        metric: &'static str,
    },

    /// 도메인 검증 에러
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// 분석 작업을 위한 Result 타입.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
