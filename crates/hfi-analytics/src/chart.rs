//! 자산 곡선 차트 데이터 구조.
//!
//! 화면 표시(터미널)와 이미지 내보내기가 공유하는 렌더링 컨텍스트입니다.
//! 호출마다 새로 생성되며 전역 차트 상태는 없습니다.
//!
//! X 좌표는 월 서수(`year * 12 + month - 1`), Y 좌표는 누적 가치입니다.

use hfi_core::{DateWindow, MonthPeriod};
use rust_decimal::prelude::*;
use serde::Serialize;

use crate::wealth::WealthIndex;

/// 차트 제목.
pub const CHART_TITLE: &str = "Wealth Accumulation: 1,000€ Invested in Hedge Fund Strategies";
/// X축 레이블.
pub const X_LABEL: &str = "Year";
/// Y축 레이블.
pub const Y_LABEL: &str = "Wealth";
/// 캔버스 크기 (12×6 인치, 100 dpi).
pub const CANVAS_SIZE: (u32, u32) = (1200, 600);
/// 선 두께.
pub const LINE_WIDTH: u32 = 2;

/// 데이터가 없을 때의 Y 범위.
const EMPTY_Y_RANGE: (f64, f64) = (0.5, 1.5);
/// Y 범위 여백 비율.
const Y_PADDING: f64 = 0.05;
/// 목표 Y 눈금 개수.
const TARGET_Y_TICKS: f64 = 6.0;
/// 눈금 배수 맞춤 시 부동소수 오차 허용치.
const SNAP_EPSILON: f64 = 1e-9;

/// 기본 10색 팔레트 (tab10).
pub const PALETTE: [SeriesColor; 10] = [
    SeriesColor(0x1f, 0x77, 0xb4),
    SeriesColor(0xff, 0x7f, 0x0e),
    SeriesColor(0x2c, 0xa0, 0x2c),
    SeriesColor(0xd6, 0x27, 0x28),
    SeriesColor(0x94, 0x67, 0xbd),
    SeriesColor(0x8c, 0x56, 0x4b),
    SeriesColor(0xe3, 0x77, 0xc2),
    SeriesColor(0x7f, 0x7f, 0x7f),
    SeriesColor(0xbc, 0xbd, 0x22),
    SeriesColor(0x17, 0xbe, 0xcf),
];

/// RGB 선 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesColor(pub u8, pub u8, pub u8);

/// 그리드 스타일.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridStyle {
    /// 점선 여부
    pub dashed: bool,
    /// 투명도 (0.0 ~ 1.0)
    pub alpha: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            dashed: true,
            alpha: 0.5,
        }
    }
}

/// 축 눈금.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// 축 좌표
    pub position: f64,
    /// 표시 레이블
    pub label: String,
}

/// 한 전략의 선.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// 범례 이름
    pub name: String,
    pub color: SeriesColor,
    pub line_width: u32,
    /// (월 서수, 누적 가치)
    pub points: Vec<(f64, f64)>,
}

/// 렌더링 컨텍스트.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WealthChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grid: GridStyle,
    pub series: Vec<ChartSeries>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// 픽셀 단위 (너비, 높이)
    pub size: (u32, u32),
}

impl WealthChart {
    /// 자산 지수와 조회 구간에서 차트를 구성합니다.
    ///
    /// X 눈금은 `start_year`부터 `step`년 간격으로 해당 연도 1월에 위치합니다.
    pub fn build(wealth: &WealthIndex, window: &DateWindow) -> Self {
        let xs: Vec<f64> = wealth.index().iter().map(|p| p.ordinal() as f64).collect();

        let series: Vec<ChartSeries> = wealth
            .series()
            .iter()
            .enumerate()
            .map(|(i, s)| ChartSeries {
                name: s.name().to_string(),
                color: PALETTE[i % PALETTE.len()],
                line_width: LINE_WIDTH,
                points: xs
                    .iter()
                    .copied()
                    .zip(s.values().iter().map(|v| decimal_to_f64(*v)))
                    .collect(),
            })
            .collect();

        let x_ticks = window
            .tick_years()
            .into_iter()
            .map(|year| Tick {
                position: MonthPeriod::first_of_year(year).ordinal() as f64,
                label: year.to_string(),
            })
            .collect();

        let x_range = (
            window.first_month().ordinal() as f64,
            window.last_month().ordinal() as f64,
        );
        let (y_range, y_ticks) = y_axis(data_y_range(&series));

        Self {
            title: CHART_TITLE.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            grid: GridStyle::default(),
            series,
            x_ticks,
            y_ticks,
            x_range,
            y_range,
            size: CANVAS_SIZE,
        }
    }

    /// 그릴 선이 있는지 확인합니다.
    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.points.is_empty())
    }
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// 데이터 범위에 5% 여백을 더한 값.
fn data_y_range(series: &[ChartSeries]) -> (f64, f64) {
    let values = series.iter().flat_map(|s| s.points.iter().map(|(_, y)| *y));

    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });

    if !min.is_finite() || !max.is_finite() {
        return EMPTY_Y_RANGE;
    }

    let span = max - min;
    let margin = if span > 0.0 {
        span * Y_PADDING
    } else {
        // 모든 값이 같으면 (예: 수익률 0) 값 자체 기준 여백
        (max.abs() * Y_PADDING).max(Y_PADDING)
    };

    (min - margin, max + margin)
}

/// 1, 2, 5 × 10^k 중 범위를 약 6칸으로 나누는 간격.
fn nice_step(span: f64) -> f64 {
    if span <= 0.0 || !span.is_finite() {
        return 1.0;
    }

    let raw = span / TARGET_Y_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;

    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// 눈금 간격의 배수로 맞춘 Y 범위와 눈금.
///
/// 첫 눈금과 마지막 눈금이 범위 양 끝에 놓이므로 눈금이 범위 안에서 균등하게 배치됩니다.
fn y_axis((min, max): (f64, f64)) -> ((f64, f64), Vec<Tick>) {
    let step = nice_step(max - min);
    let decimals = (-step.log10().floor()).max(0.0) as usize;

    let first = (min / step + SNAP_EPSILON).floor() as i64;
    let last = ((max / step - SNAP_EPSILON).ceil() as i64).max(first + 1);

    let ticks = (first..=last)
        .map(|i| {
            let position = i as f64 * step;
            Tick {
                position,
                label: format!("{:.*}", decimals, position),
            }
        })
        .collect();

    ((first as f64 * step, last as f64 * step), ticks)
}
