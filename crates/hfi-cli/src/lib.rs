//! 헤지펀드 전략 자산 곡선 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 자산 곡선 차트 표시 (터미널) 및 이미지 저장
//! - 수익률 파일의 열 목록 조회
//! - 전략별 성과 요약

pub mod commands;
pub mod render;

pub use commands::plot::run;
