//! 압축 결과 품질 보고서

use serde::{Deserialize, Serialize};

use super::metrics::{compression_ratio, mse, Psnr, QualityGrade, PSNR_SENTINEL_DB};
use crate::core::error::Result;
use crate::core::image::GrayImage;
use crate::core::mask::{clamp_threshold, kept_count};

/// 한 번의 압축에 대한 품질/압축 지표
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub block_size: usize,
    /// 자르기 정책을 적용한 d
    pub threshold: usize,
    pub mse: f64,
    pub psnr: Psnr,
    /// 버려진 계수 비율 (%)
    pub compression_ratio: f64,
    /// 블록당 남은 계수 수
    pub kept: usize,
    /// 블록당 전체 계수 수 (F²)
    pub total: usize,
    pub original_dims: (usize, usize),
    pub output_dims: (usize, usize),
    /// 블록 격자 밖이라 버려진 픽셀 수
    pub pixels_discarded: usize,
    pub pixels_discarded_pct: f64,
    pub grade: QualityGrade,
}

impl QualityReport {
    /// 표 출력용 PSNR (무한이면 100 dB)
    pub fn psnr_db(&self) -> f64 {
        self.psnr.value_or(PSNR_SENTINEL_DB)
    }

    pub fn print_report(&self) {
        println!("=== 압축 품질 보고서 ===");
        println!("블록 크기 F: {}", self.block_size);
        println!("임계값 d: {}", self.threshold);
        println!(
            "이미지: {}x{} → {}x{} (버린 픽셀 {}, {:.1}%)",
            self.original_dims.0,
            self.original_dims.1,
            self.output_dims.0,
            self.output_dims.1,
            self.pixels_discarded,
            self.pixels_discarded_pct
        );
        println!("계수: {}/{}", self.kept, self.total);
        println!("압축률: {:.2}%", self.compression_ratio);
        println!("MSE: {:.4}", self.mse);
        println!("PSNR: {}", self.psnr);
        println!("품질 등급: {}", self.grade.label());
    }
}

/// 원본과 재구성 이미지를 비교하는 분석기
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAnalyzer;

impl QualityAnalyzer {
    /// 원본, 압축본, 사용한 F와 d로 보고서 생성
    ///
    /// d는 압축기와 같은 정책으로 자른 뒤 계산한다.
    pub fn report(
        original: &GrayImage,
        compressed: &GrayImage,
        block_size: usize,
        threshold: i64,
    ) -> Result<QualityReport> {
        let threshold = clamp_threshold(block_size, threshold);
        let ratio = compression_ratio(block_size, threshold)?;
        let mse = mse(original, compressed)?;
        let psnr = Psnr::from_mse(mse);

        let (oh, ow) = original.dims();
        let (h, w) = compressed.dims();
        let original_pixels = oh * ow;
        let pixels_discarded = original_pixels - h * w;

        Ok(QualityReport {
            block_size,
            threshold,
            mse,
            psnr,
            compression_ratio: ratio,
            kept: kept_count(block_size, threshold),
            total: block_size * block_size,
            original_dims: (oh, ow),
            output_dims: (h, w),
            pixels_discarded,
            pixels_discarded_pct: pixels_discarded as f64 / original_pixels as f64 * 100.0,
            grade: QualityGrade::from_psnr(psnr),
        })
    }
}
