//! 조회 구간 정의.
//!
//! `[start_year-01, end_year-12]` 닫힌 구간과 X축 눈금 간격(연 단위)을 표현합니다.

use serde::Serialize;
use std::fmt;

use super::period::MonthPeriod;
use crate::error::CoreError;

/// 기본 시작 연도.
pub const DEFAULT_START_YEAR: i32 = 2000;
/// 기본 종료 연도.
pub const DEFAULT_END_YEAR: i32 = 2020;
/// 기본 눈금 간격 (연).
pub const DEFAULT_TICK_STEP: u32 = 5;

/// 월 단위 조회 구간.
///
/// 생성 시 `start_year <= end_year`, `step >= 1`이 보장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start_year: i32,
    end_year: i32,
    step: u32,
}

impl DateWindow {
    /// 검증된 조회 구간을 생성합니다.
    pub fn new(start_year: i32, end_year: i32, step: u32) -> Result<Self, CoreError> {
        if start_year > end_year {
            return Err(CoreError::InvalidWindow(format!(
                "start_year ({}) must not be after end_year ({})",
                start_year, end_year
            )));
        }
        if step < 1 {
            return Err(CoreError::InvalidWindow(
                "tick step must be at least 1 year".to_string(),
            ));
        }

        Ok(Self {
            start_year,
            end_year,
            step,
        })
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// 구간의 첫 달 (`start_year-01`).
    pub fn first_month(&self) -> MonthPeriod {
        MonthPeriod::first_of_year(self.start_year)
    }

    /// 구간의 마지막 달 (`end_year-12`).
    pub fn last_month(&self) -> MonthPeriod {
        MonthPeriod::last_of_year(self.end_year)
    }

    /// 기간이 구간에 포함되는지 확인합니다 (양끝 포함).
    pub fn contains(&self, period: MonthPeriod) -> bool {
        period >= self.first_month() && period <= self.last_month()
    }

    /// 구간에 포함된 개월 수.
    pub fn month_count(&self) -> usize {
        MonthPeriod::months_between_inclusive(self.first_month(), self.last_month())
    }

    /// X축 눈금 연도 목록: `start_year`부터 `step` 간격, `end_year` 이하.
    pub fn tick_years(&self) -> Vec<i32> {
        (self.start_year..=self.end_year)
            .step_by(self.step as usize)
            .collect()
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            step: DEFAULT_TICK_STEP,
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ~ {} (step {}y)",
            self.first_month(),
            self.last_month(),
            self.step
        )
    }
}
