//! 데이터 모듈 오류 타입.

use std::path::PathBuf;
use thiserror::Error;

use hfi_core::CoreError;

/// 데이터 로딩 오류.
///
/// 모든 변형은 로드 실패(LoadFailure)이며 호출자에게 그대로 전파됩니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// 입력 파일 없음
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// 파일 읽기 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 잘못된 CSV 형식
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// 날짜/숫자/헤더 파싱 오류
    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// 같은 달로 정규화되는 행이 두 개 이상
    #[error("Duplicate period {period} (lines {first_line} and {second_line})")]
    DuplicatePeriod {
        period: String,
        first_line: u64,
        second_line: u64,
    },

    /// 테이블 불변 조건 위반
    #[error("Invalid table: {0}")]
    Table(#[from] CoreError),
}

impl DataError {
    /// 파싱 오류를 생성합니다.
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        DataError::Parse {
            line,
            message: message.into(),
        }
    }

    /// 파일이 없어서 발생한 오류인지 확인합니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::FileNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
