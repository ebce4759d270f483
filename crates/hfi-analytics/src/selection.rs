//! 요청한 전략 열의 존재 여부 검증.

use std::fmt;

use hfi_core::ReturnsTable;
use serde::Serialize;

/// 검증된 열 선택 (요청 순서 유지).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSelection {
    names: Vec<String>,
    positions: Vec<usize>,
}

impl ColumnSelection {
    /// 요청한 전략 이름 (요청 순서).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 테이블 내 열 위치 (`names`와 같은 순서).
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// (이름, 열 위치) 쌍을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.names
            .iter()
            .map(|n| n.as_str())
            .zip(self.positions.iter().copied())
    }
}

/// 요청한 열 중 일부가 테이블에 없음.
///
/// 유일하게 복구되는 실패 경로이므로 에러 enum이 아닌 값 타입입니다.
/// `Display`는 사용자에게 보여줄 두 줄짜리 진단 메시지를 출력합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingColumns {
    /// 요청한 전체 이름
    pub requested: Vec<String>,
    /// 테이블에 없는 이름
    pub missing: Vec<String>,
    /// 테이블의 전체 열 (파일 순서)
    pub available: Vec<String>,
}

impl fmt::Display for MissingColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "❌ The file does not contain all required columns.")?;
        write!(f, "Available Columns: [")?;
        for (i, name) in self.available.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", quote_name(name))?;
        }
        write!(f, "]")
    }
}

/// 열 이름을 작은따옴표로 감쌉니다. 이름에 작은따옴표만 있으면 큰따옴표를 씁니다.
fn quote_name(name: &str) -> String {
    if name.contains('\'') && !name.contains('"') {
        format!("\"{}\"", name)
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

impl std::error::Error for MissingColumns {}

/// 요청한 모든 전략이 테이블에 존재하는지 검증합니다.
///
/// 빈 요청은 유효합니다 (아무것도 선택하지 않음).
pub fn validate_columns<S: AsRef<str>>(
    table: &ReturnsTable,
    requested: &[S],
) -> Result<ColumnSelection, MissingColumns> {
    let mut names = Vec::with_capacity(requested.len());
    let mut positions = Vec::with_capacity(requested.len());
    let mut missing = Vec::new();

    for name in requested {
        let name = name.as_ref();
        match table.column_position(name) {
            Some(pos) => {
                names.push(name.to_string());
                positions.push(pos);
            }
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(MissingColumns {
            requested: requested.iter().map(|s| s.as_ref().to_string()).collect(),
            missing,
            available: table.columns().to_vec(),
        });
    }

    Ok(ColumnSelection { names, positions })
}
