//! 터미널 차트 뷰어.
//!
//! 대체 화면(alternate screen)에 차트를 그리고 `q`, `Esc`, `Enter` 중 하나를
//! 누를 때까지 대기합니다.

use anyhow::{Context, Result};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::debug;

use hfi_analytics::{SeriesColor, WealthChart};

use super::ChartViewer;

const BORDER: Style = Style::new().fg(Color::DarkGray);
const GRID: Style = Style::new().fg(Color::DarkGray);

/// 대화형 터미널 뷰어.
#[derive(Debug, Default)]
pub struct TerminalViewer;

impl TerminalViewer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartViewer for TerminalViewer {
    fn show(&mut self, chart: &WealthChart) -> Result<()> {
        let mut terminal = ratatui::try_init().context("failed to initialize terminal")?;
        debug!("Terminal viewer opened");

        let result = event_loop(&mut terminal, chart);

        // 에러 여부와 관계없이 터미널 복원
        ratatui::restore();
        debug!("Terminal viewer closed");

        result
    }
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, chart: &WealthChart) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, chart))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && is_close_key(key.code) {
                return Ok(());
            }
        }
    }
}

fn is_close_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
}

fn to_color(c: SeriesColor) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// 그리드 선 하나를 이루는 점 개수.
const GRID_SAMPLES: usize = 80;

/// 눈금 위치의 그리드 선 (점 마커로 점선 표현).
fn grid_lines(chart: &WealthChart) -> Vec<Vec<(f64, f64)>> {
    let (x0, x1) = chart.x_range;
    let (y0, y1) = chart.y_range;

    let vertical = chart
        .x_ticks
        .iter()
        .map(|t| sample_segment((t.position, y0), (t.position, y1)));
    let horizontal = chart
        .y_ticks
        .iter()
        .map(|t| sample_segment((x0, t.position), (x1, t.position)));

    vertical.chain(horizontal).collect()
}

fn sample_segment(from: (f64, f64), to: (f64, f64)) -> Vec<(f64, f64)> {
    (0..=GRID_SAMPLES)
        .map(|i| {
            let t = i as f64 / GRID_SAMPLES as f64;
            (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
        })
        .collect()
}

/// 캔버스 점 마커와 같은 방식으로 X 좌표를 왼쪽 기준 셀 오프셋으로 변환합니다.
///
/// 범위를 벗어나면 `None`.
fn column_offset(value: f64, (lo, hi): (f64, f64), cells: u16) -> Option<u16> {
    if cells == 0 || hi <= lo || !(lo..=hi).contains(&value) {
        return None;
    }
    Some(((value - lo) * (f64::from(cells) - 1.0) / (hi - lo)) as u16)
}

/// Y 좌표를 위쪽 기준 셀 오프셋으로 변환합니다.
fn row_offset(value: f64, (lo, hi): (f64, f64), cells: u16) -> Option<u16> {
    if cells == 0 || hi <= lo || !(lo..=hi).contains(&value) {
        return None;
    }
    Some(((hi - value) * (f64::from(cells) - 1.0) / (hi - lo)) as u16)
}

fn text_width(label: &str) -> u16 {
    label.chars().count() as u16
}

/// X 눈금 레이블을 그리드 선 열 아래 가운데에 씁니다.
fn draw_x_labels(buf: &mut Buffer, chart: &WealthChart, graph: Rect, row: Rect) {
    for tick in &chart.x_ticks {
        let Some(offset) = column_offset(tick.position, chart.x_range, graph.width) else {
            continue;
        };
        let width = text_width(&tick.label);
        let column = graph.x + offset;
        let start = column
            .saturating_sub(width / 2)
            .min(row.right().saturating_sub(width))
            .max(row.x);
        buf.set_string(start, row.y, &tick.label, BORDER);
    }
}

/// Y 눈금 레이블을 그리드 선 행 왼쪽에 오른쪽 정렬로 씁니다.
fn draw_y_labels(buf: &mut Buffer, chart: &WealthChart, graph: Rect, column: Rect) {
    for tick in &chart.y_ticks {
        let Some(offset) = row_offset(tick.position, chart.y_range, graph.height) else {
            continue;
        };
        let row = graph.y + offset;
        let start = column
            .right()
            .saturating_sub(text_width(&tick.label) + 1)
            .max(column.x);
        buf.set_string(start, row, &tick.label, BORDER);
    }
}

pub(crate) fn draw(frame: &mut Frame, chart: &WealthChart) {
    let [chart_area, footer_area] =
        Layout::vertical([Constraint::Min(10), Constraint::Length(1)]).areas(frame.area());

    let outer = Block::bordered()
        .title(Line::from(chart.title.clone()).bold().centered())
        .border_style(BORDER);
    let inner = outer.inner(chart_area);
    frame.render_widget(outer, chart_area);

    let [y_title_row, body, x_label_row, x_title_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let label_width = chart
        .y_ticks
        .iter()
        .map(|t| text_width(&t.label))
        .max()
        .unwrap_or(0);
    let [y_label_column, plot_area] =
        Layout::horizontal([Constraint::Length(label_width + 1), Constraint::Min(1)]).areas(body);

    // 축 선: 왼쪽과 아래 테두리
    let axes = Block::new()
        .borders(Borders::LEFT | Borders::BOTTOM)
        .border_style(BORDER);
    let graph = axes.inner(plot_area);

    let grid = grid_lines(chart);
    let mut datasets: Vec<Dataset> = if chart.grid.dashed {
        grid.iter()
            .map(|line| {
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(GRID)
                    .data(line)
            })
            .collect()
    } else {
        Vec::new()
    };

    for series in &chart.series {
        datasets.push(
            Dataset::default()
                .name(series.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(to_color(series.color)))
                .data(&series.points),
        );
    }

    let (x0, x1) = chart.x_range;
    let (y0, y1) = chart.y_range;

    // 축 레이블은 직접 그리므로 Chart에는 범위만 지정
    let widget = Chart::new(datasets)
        .block(axes)
        .x_axis(Axis::default().bounds([x0, x1]).style(BORDER))
        .y_axis(Axis::default().bounds([y0, y1]).style(BORDER))
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(50)));

    frame.render_widget(widget, plot_area);

    let buf = frame.buffer_mut();
    draw_x_labels(buf, chart, graph, x_label_row);
    draw_y_labels(buf, chart, graph, y_label_column);
    buf.set_string(y_title_row.x, y_title_row.y, &chart.y_label, BORDER);

    frame.render_widget(
        Paragraph::new(chart.x_label.clone())
            .style(BORDER)
            .alignment(Alignment::Center),
        x_title_row,
    );

    let footer = if chart.has_data() {
        " q / Esc / Enter: close "
    } else {
        " No data in selected window | q / Esc / Enter: close "
    };
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::Gray)),
        footer_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfi_analytics::{plot_strategies, PlotOutcome};
    use hfi_core::{DateWindow, MonthPeriod, ReturnsTable};
    use ratatui::backend::TestBackend;
    use rust_decimal::Decimal;

    fn chart_for(months: usize, window: DateWindow) -> WealthChart {
        let mut period = MonthPeriod::new(2005, 1).unwrap();
        let mut rows = Vec::new();
        for _ in 0..months {
            rows.push((period, vec![Decimal::new(1, 2)]));
            period = period.succ();
        }
        let table = ReturnsTable::new(vec!["Global Macro".to_string()], rows).unwrap();

        match plot_strategies(&table, &["Global Macro"], &window).unwrap() {
            PlotOutcome::Chart(chart) => chart,
            PlotOutcome::MissingColumns(m) => panic!("{m}"),
        }
    }

    fn sample_chart() -> WealthChart {
        chart_for(36, DateWindow::new(2005, 2007, 1).unwrap())
    }

    /// 렌더링 결과를 행 단위 셀 기호로 반환합니다.
    fn render(chart: &WealthChart, width: u16, height: u16) -> Vec<Vec<String>> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, chart)).unwrap();

        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    /// 텍스트가 처음 나타나는 (열, 행). 위쪽 행부터 검색합니다.
    fn find_text(cells: &[Vec<String>], text: &str) -> Option<(usize, usize)> {
        let needle: Vec<String> = text.chars().map(|c| c.to_string()).collect();
        cells.iter().enumerate().find_map(|(y, row)| {
            row.windows(needle.len())
                .position(|w| w == needle.as_slice())
                .map(|x| (x, y))
        })
    }

    fn count_dots<'a>(cells: impl Iterator<Item = &'a String>) -> usize {
        cells.filter(|s| s.as_str() == "•").count()
    }

    #[test]
    fn test_close_keys() {
        assert!(is_close_key(KeyCode::Char('q')));
        assert!(is_close_key(KeyCode::Esc));
        assert!(is_close_key(KeyCode::Enter));
        assert!(!is_close_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_grid_lines_per_tick() {
        let chart = sample_chart();
        let lines = grid_lines(&chart);
        assert_eq!(lines.len(), chart.x_ticks.len() + chart.y_ticks.len());
        assert!(lines.iter().all(|l| l.len() == GRID_SAMPLES + 1));
    }

    #[test]
    fn test_cell_offsets() {
        assert_eq!(column_offset(0.0, (0.0, 10.0), 11), Some(0));
        assert_eq!(column_offset(10.0, (0.0, 10.0), 11), Some(10));
        assert_eq!(column_offset(11.0, (0.0, 10.0), 11), None);
        assert_eq!(column_offset(1.0, (1.0, 1.0), 11), None);

        // 큰 값이 위쪽
        assert_eq!(row_offset(10.0, (0.0, 10.0), 11), Some(0));
        assert_eq!(row_offset(0.0, (0.0, 10.0), 11), Some(10));
        assert_eq!(row_offset(-1.0, (0.0, 10.0), 11), None);
    }

    #[test]
    fn test_x_label_sits_under_its_grid_line() {
        let chart = chart_for(180, DateWindow::new(2005, 2019, 2).unwrap());
        let cells = render(&chart, 160, 40);
        let width = cells[0].len();

        // 세로 그리드 열: 점이 대부분의 행에 있는 열
        let grid_columns: Vec<usize> = (0..width)
            .filter(|&x| count_dots(cells.iter().map(|row| &row[x])) > 20)
            .collect();
        assert_eq!(grid_columns.len(), chart.x_ticks.len());

        let (start, _) = find_text(&cells, "2019").unwrap();
        assert_eq!(start + 2, *grid_columns.last().unwrap());

        let (start, _) = find_text(&cells, "2011").unwrap();
        assert_eq!(start + 2, grid_columns[3]);
    }

    #[test]
    fn test_y_label_sits_on_its_grid_line() {
        let chart = chart_for(180, DateWindow::new(2005, 2019, 2).unwrap());
        assert_eq!(chart.y_ticks.last().unwrap().label, "7");

        let cells = render(&chart, 160, 40);
        let (_, row) = find_text(&cells, "7").unwrap();

        assert!(count_dots(cells[row].iter()) > 60);
        assert!(count_dots(cells[row - 1].iter()) < 10);
    }

    #[test]
    fn test_draw_renders_title_and_legend() {
        let chart = sample_chart();
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &chart)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Wealth Accumulation"));
        assert!(text.contains("Global Macro"));
        assert!(text.contains("2005"));
    }
}
