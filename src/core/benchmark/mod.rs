//! # 변환 벤치마크
//!
//! 직접(O(N³))과 빠른(O(N²logN)) 변환의 크기별 실행 시간과 증가율.

pub mod analysis;
pub mod harness;

pub use analysis::{
    cubic_ratio, loglog_slope, n2_log_n_ratio, ComplexityAnalysis, ScalingStep, Speedup,
};
pub use harness::{BenchmarkHarness, BenchmarkReport, BenchmarkStep, TimingSample};
