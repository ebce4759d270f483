//! 월별 수익률 테이블.
//!
//! 행은 `MonthPeriod`로 인덱싱되고 열은 전략 이름입니다.
//! 셀 값은 소수 수익률입니다 (0.012 = +1.2%).
//!
//! 테이블은 한 번 생성되면 변경되지 않으며, 모든 후속 단계는 새 테이블을 만듭니다.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::MonthPeriod;

/// 월별 전략 수익률 테이블.
///
/// # 불변 조건
///
/// - 인덱스는 엄격하게 증가합니다 (같은 달의 행이 두 개 존재할 수 없음)
/// - 모든 행은 열 개수와 같은 수의 셀을 가집니다
/// - 열 이름은 중복되지 않습니다
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnsTable {
    columns: Vec<String>,
    index: Vec<MonthPeriod>,
    /// 행 우선 저장 (`rows[i][j]` = i번째 달, j번째 전략)
    rows: Vec<Vec<Decimal>>,
}

impl ReturnsTable {
    /// 불변 조건을 검증하며 테이블을 생성합니다.
    ///
    /// # 매개변수
    ///
    /// * `columns` - 전략 이름 목록 (파일 순서)
    /// * `rows` - (기간, 셀 값) 목록. 시간순으로 정렬되어 있어야 합니다.
    pub fn new(
        columns: Vec<String>,
        rows: Vec<(MonthPeriod, Vec<Decimal>)>,
    ) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(CoreError::InvalidTable(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }

        let mut index = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());

        for (period, cells) in rows {
            if cells.len() != columns.len() {
                return Err(CoreError::InvalidTable(format!(
                    "row {} has {} values, expected {}",
                    period,
                    cells.len(),
                    columns.len()
                )));
            }

            if let Some(prev) = index.last() {
                if period <= *prev {
                    return Err(CoreError::InvalidTable(format!(
                        "index must be strictly increasing: {} follows {}",
                        period, prev
                    )));
                }
            }

            index.push(period);
            values.push(cells);
        }

        Ok(Self {
            columns,
            index,
            rows: values,
        })
    }

    /// 열(전략) 이름 목록.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 행 인덱스 (시간순).
    pub fn index(&self) -> &[MonthPeriod] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 한 열의 값을 시간순으로 반환합니다.
    pub fn column(&self, name: &str) -> Option<Vec<Decimal>> {
        let pos = self.column_position(name)?;
        Some(self.rows.iter().map(|row| row[pos]).collect())
    }

    /// i번째 행 (기간, 셀 값).
    pub fn row(&self, i: usize) -> Option<(MonthPeriod, &[Decimal])> {
        let period = *self.index.get(i)?;
        let cells = self.rows.get(i)?;
        Some((period, cells.as_slice()))
    }

    /// 모든 행을 시간순으로 순회합니다.
    pub fn rows(&self) -> impl Iterator<Item = (MonthPeriod, &[Decimal])> + '_ {
        self.index
            .iter()
            .copied()
            .zip(self.rows.iter().map(|r| r.as_slice()))
    }

    /// 데이터가 포함하는 첫 달과 마지막 달.
    pub fn coverage(&self) -> Option<(MonthPeriod, MonthPeriod)> {
        Some((*self.index.first()?, *self.index.last()?))
    }

    /// 조건을 만족하는 행만 담은 새 테이블을 반환합니다.
    ///
    /// 원래 순서가 유지되므로 불변 조건은 그대로 성립합니다.
    pub fn filter_rows<F>(&self, mut predicate: F) -> ReturnsTable
    where
        F: FnMut(MonthPeriod) -> bool,
    {
        let mut index = Vec::new();
        let mut rows = Vec::new();

        for (period, cells) in self.index.iter().zip(&self.rows) {
            if predicate(*period) {
                index.push(*period);
                rows.push(cells.clone());
            }
        }

        ReturnsTable {
            columns: self.columns.clone(),
            index,
            rows,
        }
    }
}
