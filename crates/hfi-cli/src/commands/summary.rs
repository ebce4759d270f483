//! 전략별 성과 요약 명령어.
//!
//! ```bash
//! hfi summary -s "Global Macro" -s "CTA Global" --from 2008 --to 2012
//! hfi summary --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use hfi_analytics::{compute_wealth, slice_window, validate_columns, WealthSummary};
use hfi_core::DateWindow;
use hfi_data::load_returns;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// 요약 명령 설정.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub returns_path: PathBuf,
    pub strategies: Vec<String>,
    pub window: DateWindow,
    pub format: OutputFormat,
}

/// 전략별 요약을 계산합니다.
///
/// 열이 없으면 진단 메시지를 출력하고 빈 목록을 반환합니다.
pub fn summarize(config: &SummaryConfig) -> Result<Vec<WealthSummary>> {
    let table = load_returns(&config.returns_path).with_context(|| {
        format!(
            "Failed to load returns from {}",
            config.returns_path.display()
        )
    })?;

    let selection = match validate_columns(&table, &config.strategies) {
        Ok(selection) => selection,
        Err(missing) => {
            println!("{}", missing);
            return Ok(Vec::new());
        }
    };

    let sliced = slice_window(&table, &config.window);
    let wealth = compute_wealth(&sliced, &selection)?;

    Ok(wealth.summaries()?)
}

/// 요약을 계산하여 출력합니다.
pub fn print_summary(config: &SummaryConfig) -> Result<usize> {
    let summaries = summarize(config)?;
    if summaries.is_empty() {
        return Ok(0);
    }

    match config.format {
        OutputFormat::Table => {
            println!("\n💼 성과 요약 ({})", config.window);
            print!("{}", format_table(&summaries));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }

    info!(strategies = summaries.len(), "Summary printed");
    Ok(summaries.len())
}

/// 요약 표 텍스트.
pub fn format_table(summaries: &[WealthSummary]) -> String {
    let name_width = summaries
        .iter()
        .map(|s| s.strategy.chars().count())
        .max()
        .unwrap_or(0)
        .max("Strategy".len());

    let mut out = format!(
        "{:<w$}  {:>6}  {:>10}  {:>12}  {:>10}  {:>8}\n",
        "Strategy",
        "Months",
        "Wealth",
        "Total Ret %",
        "Max DD %",
        "CAGR %",
        w = name_width
    );

    for s in summaries {
        out.push_str(&format!(
            "{:<w$}  {:>6}  {:>10.4}  {:>12.2}  {:>10.2}  {:>8.2}\n",
            s.strategy,
            s.months,
            s.final_wealth,
            s.total_return_pct,
            s.max_drawdown_pct,
            s.cagr_pct,
            w = name_width
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn write_returns(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("returns.csv");
        let mut content = String::from("date,Global Macro,CTA\n");
        for month in 1..=12 {
            content.push_str(&format!("28/{:02}/2010,1,0\n", month));
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    fn config(path: PathBuf, strategies: &[&str]) -> SummaryConfig {
        SummaryConfig {
            returns_path: path,
            strategies: strategies.iter().map(|s| s.to_string()).collect(),
            window: DateWindow::new(2010, 2010, 1).unwrap(),
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_summarize() {
        let dir = tempfile::tempdir().unwrap();
        let summaries = summarize(&config(write_returns(&dir), &["Global Macro", "CTA"])).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].strategy, "Global Macro");
        assert_eq!(summaries[0].months, 12);
        assert!(summaries[0].final_wealth > dec!(1.126) && summaries[0].final_wealth < dec!(1.127));
        assert_eq!(summaries[1].final_wealth, dec!(1));
    }

    #[test]
    fn test_missing_column_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let summaries = summarize(&config(write_returns(&dir), &["Nope"])).unwrap();
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_huge_wealth_is_error_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("returns.csv");
        let mut content = String::from("date,Doubling\n");
        // 90개월 매월 +100%: 2000-01 ~ 2007-06
        for i in 0..90 {
            content.push_str(&format!("28/{:02}/{},100\n", i % 12 + 1, 2000 + i / 12));
        }
        std::fs::write(&path, content).unwrap();

        let mut config = config(path, &["Doubling"]);
        config.window = DateWindow::new(2000, 2007, 1).unwrap();
        let err = summarize(&config).unwrap_err();

        assert!(err.to_string().contains("total return overflow in 'Doubling'"));
    }

    #[test]
    fn test_format_table() {
        let summaries = vec![WealthSummary {
            strategy: "Global Macro".to_string(),
            months: 12,
            final_wealth: dec!(1.126825),
            total_return_pct: dec!(12.6825),
            max_drawdown_pct: dec!(0),
            cagr_pct: dec!(12.6825),
        }];

        let table = format_table(&summaries);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Strategy    "));
        assert!(lines[1].contains("1.1268"));
        assert!(lines[1].contains("12.68"));
    }
}
