//! 월 단위 기간 정의.
//!
//! 수익률 테이블의 행 인덱스는 일(day)이 아닌 연-월 단위입니다.
//! 같은 달의 모든 날짜는 하나의 `MonthPeriod`로 정규화됩니다.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 연-월 기간 (예: `2005-01`).
///
/// 필드 순서(연도, 월)대로 비교되므로 파생된 `Ord`가 곧 시간순 정렬입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// 새 기간을 생성합니다. 월은 1-12 범위여야 합니다.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidPeriod(format!(
                "month must be within 1..=12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// 날짜가 속한 달을 반환합니다 (일 정보는 버림).
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// 해당 연도의 1월.
    pub fn first_of_year(year: i32) -> Self {
        Self { year, month: 1 }
    }

    /// 해당 연도의 12월.
    pub fn last_of_year(year: i32) -> Self {
        Self { year, month: 12 }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// 다음 달.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// 연속된 월 번호 (`year * 12 + month - 1`).
    ///
    /// 차트의 X축 좌표로 사용됩니다.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// `start`부터 `end`까지(양끝 포함)의 개월 수. `start > end`이면 0.
    pub fn months_between_inclusive(start: MonthPeriod, end: MonthPeriod) -> usize {
        if start > end {
            return 0;
        }
        (end.ordinal() - start.ordinal() + 1) as usize
    }

    /// 해당 월의 1일.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| CoreError::InvalidPeriod(format!("expected YYYY-MM, got '{}'", s)))?;

        let year = year
            .parse::<i32>()
            .map_err(|_| CoreError::InvalidPeriod(format!("invalid year in '{}'", s)))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| CoreError::InvalidPeriod(format!("invalid month in '{}'", s)))?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthPeriod {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthPeriod> for String {
    fn from(period: MonthPeriod) -> Self {
        period.to_string()
    }
}

impl From<NaiveDate> for MonthPeriod {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_date_discards_day() {
        let a = MonthPeriod::from_date(NaiveDate::from_ymd_opt(1997, 1, 31).unwrap());
        let b = MonthPeriod::from_date(NaiveDate::from_ymd_opt(1997, 1, 1).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "1997-01");
    }

    #[test]
    fn test_period_ordering() {
        let dec = MonthPeriod::new(2004, 12).unwrap();
        let jan = MonthPeriod::new(2005, 1).unwrap();
        assert!(dec < jan);
        assert_eq!(dec.succ(), jan);
    }

    #[test]
    fn test_period_parse() {
        let period: MonthPeriod = "2019-12".parse().unwrap();
        assert_eq!(period.year(), 2019);
        assert_eq!(period.month(), 12);

        assert!("2019-13".parse::<MonthPeriod>().is_err());
        assert!("2019".parse::<MonthPeriod>().is_err());
        assert!("abcd-01".parse::<MonthPeriod>().is_err());
    }

    #[test]
    fn test_months_between() {
        let start = MonthPeriod::first_of_year(2005);
        let end = MonthPeriod::last_of_year(2019);
        assert_eq!(MonthPeriod::months_between_inclusive(start, end), 180);
        assert_eq!(MonthPeriod::months_between_inclusive(end, start), 0);
        assert_eq!(MonthPeriod::months_between_inclusive(start, start), 1);
    }

    #[test]
    fn test_ordinal_is_contiguous() {
        let dec = MonthPeriod::last_of_year(2004);
        assert_eq!(dec.succ().ordinal(), dec.ordinal() + 1);
    }

    #[test]
    fn test_serde_as_string() {
        let period = MonthPeriod::new(2008, 9).unwrap();
        let value = String::from(period);
        assert_eq!(value, "2008-09");
        assert_eq!(MonthPeriod::try_from(value).unwrap(), period);
    }
}
