//! # 블록 DCT 압축 핵심 모듈
//!
//! 변환 → 주파수 마스크 → 블록 압축기 → 품질 분석 → 벤치마크

pub mod benchmark;
pub mod compressor;
pub mod config;
pub mod error;
pub mod image;
pub mod mask;
pub mod quality;
pub mod synthetic;
pub mod transform;

// 주요 타입들 재수출
pub use benchmark::{BenchmarkHarness, BenchmarkReport, ComplexityAnalysis, TimingSample};
pub use compressor::{compress, quantize, BlockCompressor, BlockLayout};
pub use config::{BenchmarkConfig, CompressionConfig};
pub use error::{CompressError, Result};
pub use image::GrayImage;
pub use mask::{clamp_threshold, kept_count, max_threshold, FrequencyMask};
pub use quality::{
    compression_ratio, mse, psnr, run_experiments, threshold_sweep, ExperimentPlan,
    ExperimentRecord, ExperimentSummary, Psnr, QualityAnalyzer, QualityGrade, QualityReport,
};
pub use synthetic::SyntheticPattern;
pub use transform::{
    basis_matrix, transform_1d, verify_equivalence, verify_round_trip, BasisCache, BlockTransform,
    DirectTransform, FastTransform, TransformEngine, TransformKind,
};
