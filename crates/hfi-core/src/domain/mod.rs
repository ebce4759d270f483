//! 수익률 데이터를 위한 도메인 모델.

mod returns;

pub use returns::*;
