//! 차트 이미지 내보내기.
//!
//! 확장자에 따라 SVG 또는 PNG로 저장합니다. `--output`을 지정했을 때만 사용됩니다.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::info;

use hfi_analytics::{SeriesColor, Tick, WealthChart};

use super::ChartViewer;

const GRID_COLOR: RGBColor = RGBColor(128, 128, 128);

/// 이미지 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// 파일 확장자에서 형식을 결정합니다.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            _ => Err(anyhow!(
                "Unsupported output format: {}. Use .svg or .png",
                path.display()
            )),
        }
    }
}

/// 파일로 차트를 저장하는 뷰어.
#[derive(Debug, Clone)]
pub struct ImageExporter {
    path: PathBuf,
    format: ImageFormat,
}

impl ImageExporter {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = ImageFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartViewer for ImageExporter {
    fn show(&mut self, chart: &WealthChart) -> Result<()> {
        match self.format {
            ImageFormat::Svg => {
                let root = SVGBackend::new(&self.path, chart.size).into_drawing_area();
                draw_chart(&root, chart)?;
                root.present()?;
            }
            ImageFormat::Png => {
                let root = BitMapBackend::new(&self.path, chart.size).into_drawing_area();
                draw_chart(&root, chart)?;
                root.present()?;
            }
        }

        info!(path = %self.path.display(), "Chart saved");
        Ok(())
    }
}

fn to_rgb(c: SeriesColor) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// 눈금 위치에 맞는 레이블 (모델의 레이블 사용).
fn tick_label(ticks: &[Tick], value: f64) -> String {
    ticks
        .iter()
        .find(|t| (t.position - value).abs() < 1e-9)
        .map(|t| t.label.clone())
        .unwrap_or_else(|| format!("{:.2}", value))
}

fn draw_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &WealthChart,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    area.fill(&WHITE)?;

    let (x0, x1) = chart.x_range;
    let (y0, y1) = chart.y_range;
    let x_keys: Vec<f64> = chart.x_ticks.iter().map(|t| t.position).collect();
    let y_keys: Vec<f64> = chart.y_ticks.iter().map(|t| t.position).collect();

    let mut ctx = ChartBuilder::on(area)
        .caption(&chart.title, ("sans-serif", 22).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (x0..x1).with_key_points(x_keys),
            (y0..y1).with_key_points(y_keys),
        )?;

    let x_formatter = |x: &f64| tick_label(&chart.x_ticks, *x);
    let y_formatter = |y: &f64| tick_label(&chart.y_ticks, *y);

    ctx.configure_mesh()
        .disable_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .draw()?;

    // 점선 그리드
    let grid_style = GRID_COLOR.mix(chart.grid.alpha).stroke_width(1);
    for tick in &chart.x_ticks {
        ctx.draw_series(DashedLineSeries::new(
            vec![(tick.position, y0), (tick.position, y1)],
            6,
            4,
            grid_style,
        ))?;
    }
    for tick in &chart.y_ticks {
        ctx.draw_series(DashedLineSeries::new(
            vec![(x0, tick.position), (x1, tick.position)],
            6,
            4,
            grid_style,
        ))?;
    }

    for series in &chart.series {
        let color = to_rgb(series.color);
        ctx.draw_series(LineSeries::new(
            series.points.iter().copied(),
            color.stroke_width(series.line_width),
        ))?
        .label(series.name.clone())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if !chart.series.is_empty() {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}
