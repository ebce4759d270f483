//! 핵심 도메인 에러 타입.
//!
//! 기간, 조회 구간, 수익률 테이블을 생성할 때 발생하는 검증 에러를 정의합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 잘못된 조회 구간 (시작 연도 > 종료 연도, step < 1)
    #[error("잘못된 조회 구간: {0}")]
    InvalidWindow(String),

    /// 잘못된 월 기간
    #[error("잘못된 기간: {0}")]
    InvalidPeriod(String),

    /// 테이블 불변 조건 위반
    #[error("잘못된 테이블: {0}")]
    InvalidTable(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 핵심 도메인 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// 입력 데이터 자체의 문제인지 확인합니다.
    pub fn is_data_error(&self) -> bool {
        matches!(self, CoreError::InvalidPeriod(_) | CoreError::InvalidTable(_))
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
