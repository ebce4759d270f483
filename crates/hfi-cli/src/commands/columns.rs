//! 수익률 파일의 열 목록 조회.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use hfi_core::ReturnsTable;
use hfi_data::load_returns;

/// 파일의 전략 열과 데이터 기간을 출력합니다.
///
/// 출력한 열 개수를 반환합니다.
pub fn list_columns(path: &Path) -> Result<usize> {
    let table = load_returns(path)
        .with_context(|| format!("Failed to load returns from {}", path.display()))?;

    print!("{}", format_columns(&table));
    info!(columns = table.columns().len(), "Listed columns");

    Ok(table.columns().len())
}

/// 열 목록 텍스트.
pub fn format_columns(table: &ReturnsTable) -> String {
    let mut out = String::new();

    match table.coverage() {
        Some((first, last)) => out.push_str(&format!(
            "📅 기간: {} ~ {} ({} 개월)\n",
            first,
            last,
            table.len()
        )),
        None => out.push_str("📅 기간: 데이터 없음\n"),
    }

    out.push_str(&format!("📊 전략 ({}개):\n", table.columns().len()));
    for (i, name) in table.columns().iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n", i + 1, name));
    }

    out
}
