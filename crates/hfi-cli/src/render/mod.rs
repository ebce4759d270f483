//! 차트 표시 방식.
//!
//! - [`TerminalViewer`]: 터미널 화면에 표시 (디스크에 아무것도 쓰지 않음)
//! - [`ImageExporter`]: SVG/PNG 파일로 저장

use anyhow::Result;
use hfi_analytics::WealthChart;

pub mod image;
pub mod terminal;

pub use image::ImageExporter;
pub use terminal::TerminalViewer;

/// 렌더링 컨텍스트를 화면이나 파일로 출력합니다.
pub trait ChartViewer {
    fn show(&mut self, chart: &WealthChart) -> Result<()>;
}
