//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 설정은 기본값 → TOML 파일 → 환경 변수 순서로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CoreError;
use crate::types::DateWindow;

/// 기본 입력 파일 이름 (작업 디렉토리 기준).
pub const DEFAULT_RETURNS_FILE: &str = "edhec-hedgefundindices.csv";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 기본으로 표시할 전략 목록.
pub const DEFAULT_STRATEGIES: [&str; 3] = ["Global Macro", "Event Driven", "Long/Short Equity"];

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 입력 데이터 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 차트 설정
    #[serde(default)]
    pub plot: PlotConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 입력 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 수익률 CSV 경로
    pub returns_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            returns_path: DEFAULT_RETURNS_FILE.to_string(),
        }
    }
}

/// 차트 설정.
///
/// 기본값은 인자 없는 실행과 동일합니다: 2005-2019, 2년 간격.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlotConfig {
    /// 표시할 전략 이름
    pub strategies: Vec<String>,
    /// 시작 연도 (1월부터 포함)
    pub start_year: i32,
    /// 종료 연도 (12월까지 포함)
    pub end_year: i32,
    /// X축 눈금 간격 (연)
    pub step: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            strategies: DEFAULT_STRATEGIES.iter().map(|s| s.to_string()).collect(),
            start_year: 2005,
            end_year: 2019,
            step: 2,
        }
    }
}

impl PlotConfig {
    /// 검증된 조회 구간으로 변환합니다.
    pub fn window(&self) -> Result<DateWindow, CoreError> {
        DateWindow::new(self.start_year, self.end_year, self.step)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    /// 환경 변수 예: `HFI__PLOT__START_YEAR=2001`, `HFI__PLOT__STRATEGIES=CTA,Global Macro`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // 파일에서 로드 (선택)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("HFI")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("plot.strategies"),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.plot.window()?;

        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, CoreError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}
