//! 수익률 데이터 로딩.
//!
//! 이 crate는 다음을 제공합니다:
//! - 구분자 텍스트(CSV) 파일 → `ReturnsTable` 변환
//! - 일-우선(day-first) 날짜 파싱 및 월 단위 정규화
//! - 퍼센트 포인트 → 소수 수익률 변환

pub mod date;
pub mod error;
pub mod loader;

pub use date::parse_day_first;
pub use error::{DataError, Result};
pub use loader::{load_returns, ReturnsLoader};
