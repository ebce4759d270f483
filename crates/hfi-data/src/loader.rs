//! 월별 수익률 CSV 로더.
//!
//! 첫 번째 열은 일-우선 날짜(행 키), 나머지 열은 전략별 수익률(퍼센트 포인트)입니다.
//!
//! ```text
//! date,Convertible Arbitrage,CTA Global,...
//! 31/01/1997,1.19,3.93,...
//! ```
//!
//! 모든 값은 100으로 나누어 소수 수익률로 저장되고 (`1.19` → `0.0119`),
//! 행 키는 해당 월로 정규화됩니다.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use tracing::{debug, info};

use hfi_core::{MonthPeriod, ReturnsTable};

use crate::date::parse_day_first;
use crate::error::{DataError, Result};

/// 파싱된 한 행 (원본 줄 번호 포함).
struct ParsedRow {
    period: MonthPeriod,
    line: u64,
    values: Vec<Decimal>,
}

/// 구분자 텍스트 파일에서 `ReturnsTable`을 만드는 로더.
#[derive(Debug, Clone)]
pub struct ReturnsLoader {
    delimiter: u8,
}

impl Default for ReturnsLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ReturnsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 구분자를 지정합니다 (예: `b';'`, `b'\t'`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 파일 경로에서 테이블을 로드합니다.
    ///
    /// # Errors
    ///
    /// 파일이 없으면 [`DataError::FileNotFound`], 내용이 올바른 표 형식이 아니면
    /// [`DataError::Csv`] / [`DataError::Parse`] / [`DataError::DuplicatePeriod`].
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ReturnsTable> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading returns");

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DataError::FileNotFound(path.to_path_buf()),
            _ => DataError::Io(e),
        })?;

        self.load_from_reader(BufReader::new(file))
    }

    /// 임의의 reader에서 테이블을 로드합니다.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<ReturnsTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = parse_header(reader.headers()?)?;

        let mut parsed = Vec::new();
        for record in reader.records() {
            let record = record?;
            parsed.push(parse_row(&record, columns.len())?);
        }

        // 행 순서는 시간순으로 정렬 (안정 정렬: 중복 검출 시 원래 줄 순서 유지)
        parsed.sort_by_key(|row| row.period);

        for pair in parsed.windows(2) {
            if pair[0].period == pair[1].period {
                return Err(DataError::DuplicatePeriod {
                    period: pair[0].period.to_string(),
                    first_line: pair[0].line.min(pair[1].line),
                    second_line: pair[0].line.max(pair[1].line),
                });
            }
        }

        let rows = parsed.into_iter().map(|row| (row.period, row.values)).collect();
        let table = ReturnsTable::new(columns, rows)?;

        match table.coverage() {
            Some((first, last)) => debug!(
                rows = table.len(),
                columns = table.columns().len(),
                %first,
                %last,
                "Returns loaded"
            ),
            None => debug!(columns = table.columns().len(), "Returns loaded (no rows)"),
        }

        Ok(table)
    }
}

/// 기본 설정으로 파일을 로드합니다.
pub fn load_returns<P: AsRef<Path>>(path: P) -> Result<ReturnsTable> {
    ReturnsLoader::default().load(path)
}

/// 헤더에서 전략 이름 목록을 추출합니다 (첫 번째 날짜 열 제외).
fn parse_header(header: &StringRecord) -> Result<Vec<String>> {
    if header.is_empty() {
        return Err(DataError::parse(1, "missing header row"));
    }

    let mut columns: Vec<String> = Vec::with_capacity(header.len().saturating_sub(1));
    for (i, name) in header.iter().enumerate().skip(1) {
        if name.is_empty() {
            return Err(DataError::parse(1, format!("column {} has an empty name", i + 1)));
        }
        if columns.iter().any(|c| c == name) {
            return Err(DataError::parse(1, format!("duplicate column name '{}'", name)));
        }
        columns.push(name.to_string());
    }

    Ok(columns)
}

fn parse_row(record: &StringRecord, width: usize) -> Result<ParsedRow> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    let key = record.get(0).unwrap_or_default();
    let period = parse_day_first(key)
        .ok_or_else(|| DataError::parse(line, format!("invalid date '{}'", key)))?;

    if record.len() != width + 1 {
        return Err(DataError::parse(
            line,
            format!("expected {} values, found {}", width, record.len().saturating_sub(1)),
        ));
    }

    let values = record
        .iter()
        .skip(1)
        .map(|cell| {
            parse_percentage(cell)
                .ok_or_else(|| DataError::parse(line, format!("invalid number '{}'", cell)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedRow {
        period,
        line,
        values,
    })
}

/// 퍼센트 포인트 문자열을 소수 수익률로 변환합니다 (`"1.23"` → `0.0123`).
fn parse_percentage(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }

    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()?;

    value.checked_div(Decimal::ONE_HUNDRED)
}
