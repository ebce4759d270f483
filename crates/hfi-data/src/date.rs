//! 일-우선(day-first) 날짜 파싱.
//!
//! 행 키는 어떤 날짜 표현이든 해당 월로 정규화됩니다.
//! `01/02/1997`은 2월 1일(일/월/연)로 해석됩니다.

use chrono::{NaiveDate, NaiveDateTime};

use hfi_core::MonthPeriod;

/// 시도할 날짜 형식 (순서대로).
///
/// `%Y`는 두 자리 연도도 받아들이므로 구분자마다 `%y` 형식을 먼저 시도합니다.
const DATE_FORMATS: [&str; 8] = [
    "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d",
    "%Y/%m/%d",
];

/// 시도할 날짜-시간 형식.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// 날짜 문자열을 일-우선 규칙으로 파싱하여 해당 월을 반환합니다.
///
/// 지원 형식: `dd/mm/yy`, `dd-mm-yy`, `dd.mm.yy`, `dd/mm/YYYY`, `dd-mm-YYYY`, `dd.mm.YYYY`,
/// `YYYY-mm-dd`, `YYYY/mm/dd`, 시각이 붙은 형식, 그리고 `YYYY-MM`.
pub fn parse_day_first(raw: &str) -> Option<MonthPeriod> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(MonthPeriod::from_date(date));
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(MonthPeriod::from_date(datetime.date()));
        }
    }

    // 이미 월 단위로 기록된 경우
    raw.parse::<MonthPeriod>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(year: i32, month: u32) -> MonthPeriod {
        MonthPeriod::new(year, month).unwrap()
    }

    #[test]
    fn test_day_first() {
        assert_eq!(parse_day_first("31/01/1997"), Some(period(1997, 1)));
        // 일/월 순서: 2월
        assert_eq!(parse_day_first("01/02/1997"), Some(period(1997, 2)));
        assert_eq!(parse_day_first("28-02-2019"), Some(period(2019, 2)));
        assert_eq!(parse_day_first("31.12.2019"), Some(period(2019, 12)));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(parse_day_first("31/01/97"), Some(period(1997, 1)));
        assert_eq!(parse_day_first("31-01-97"), Some(period(1997, 1)));
        assert_eq!(parse_day_first("31.01.97"), Some(period(1997, 1)));
        assert_eq!(parse_day_first("28-02-05"), Some(period(2005, 2)));
        // 네 자리 연도는 그대로
        assert_eq!(parse_day_first("28-02-2019"), Some(period(2019, 2)));
    }

    #[test]
    fn test_iso_forms() {
        assert_eq!(parse_day_first("1997-01-31"), Some(period(1997, 1)));
        assert_eq!(parse_day_first("1997/03/31"), Some(period(1997, 3)));
        assert_eq!(parse_day_first("1997-01-31 00:00:00"), Some(period(1997, 1)));
        assert_eq!(parse_day_first("1997-05"), Some(period(1997, 5)));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_day_first(""), None);
        assert_eq!(parse_day_first("not a date"), None);
        assert_eq!(parse_day_first("31/13/1997"), None);
    }
}
