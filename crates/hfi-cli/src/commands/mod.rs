//! CLI 명령어 구현 모듈.

pub mod columns;
pub mod plot;
pub mod summary;
