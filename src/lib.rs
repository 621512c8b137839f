//! 블록 DCT 이미지 압축 라이브러리
//!
//! 그레이스케일 이미지를 F×F 블록으로 나누어 2차원 DCT-II를 적용하고,
//! k + l < d 인 저주파 계수만 남긴 뒤 역변환으로 재구성한다.
//! 직접 행렬곱(O(F³))과 분리형 빠른 변환(O(F²logF)) 두 구현을 제공한다.

pub mod core;

// 핵심 모듈들 재수출
pub use core::{
    // 이미지와 오류
    CompressError, GrayImage, Result,
    // 변환
    BasisCache, BlockTransform, TransformEngine, TransformKind,
    // 압축
    compress, BlockCompressor, CompressionConfig, FrequencyMask,
    // 품질 / 벤치마크
    BenchmarkConfig, BenchmarkHarness, ComplexityAnalysis, Psnr, QualityAnalyzer, QualityReport,
};
