//! # 품질 분석
//!
//! 재구성 오차(MSE, PSNR)와 마스크로 정해지는 이론 압축률.

pub mod analyzer;
pub mod experiment;
pub mod metrics;

pub use analyzer::{QualityAnalyzer, QualityReport};
pub use experiment::{
    run_experiments, run_experiments_with_progress, threshold_sweep, ExperimentPlan,
    ExperimentRecord, ExperimentSummary, DEFAULT_SWEEP,
};
pub use metrics::{compression_ratio, mse, psnr, Psnr, QualityGrade, PSNR_SENTINEL_DB};

#[cfg(test)]
mod __tests__;
