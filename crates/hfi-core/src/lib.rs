//! # HFI Core
//!
//! 헤지펀드 전략 수익률 분석의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 월 단위 기간 (`MonthPeriod`) 및 조회 구간 (`DateWindow`)
//! - 월별 수익률 테이블 (`ReturnsTable`)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
