//! 조회 구간으로 행 잘라내기.

use hfi_core::{DateWindow, ReturnsTable};
use tracing::debug;

/// `[start_year-01, end_year-12]` 구간에 속한 행만 담은 새 테이블을 반환합니다.
///
/// 구간이 데이터 범위와 겹치지 않으면 빈 테이블이 됩니다 (에러 아님).
pub fn slice_window(table: &ReturnsTable, window: &DateWindow) -> ReturnsTable {
    let sliced = table.filter_rows(|period| window.contains(period));

    debug!(
        window = %window,
        source_rows = table.len(),
        rows = sliced.len(),
        "Window sliced"
    );

    sliced
}
