//! 워크스페이스 전반에서 사용되는 공통 타입.

mod period;
mod window;

pub use period::*;
pub use window::*;
