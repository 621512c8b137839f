//! MSE / PSNR / 압축률

use std::fmt;

use ndarray::s;
use serde::{Deserialize, Serialize};

use crate::core::error::{CompressError, Result};
use crate::core::image::GrayImage;
use crate::core::mask::kept_count;

/// 8비트 최대값
pub const PEAK: f64 = 255.0;

/// 표에서 무한 PSNR 대신 쓰는 값 (dB)
pub const PSNR_SENTINEL_DB: f64 = 100.0;

/// 피크 신호 대 잡음비
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Psnr {
    Finite(f64),
    /// MSE = 0 (완전 복원)
    Infinite,
}

impl Psnr {
    pub fn from_mse(mse: f64) -> Self {
        if mse > 0.0 {
            Psnr::Finite(10.0 * (PEAK * PEAK / mse).log10())
        } else {
            Psnr::Infinite
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Psnr::Infinite)
    }

    /// 유한값 또는 주어진 대체값
    pub fn value_or(&self, sentinel: f64) -> f64 {
        match self {
            Psnr::Finite(db) => *db,
            Psnr::Infinite => sentinel,
        }
    }

    /// f64로 (무한이면 f64::INFINITY)
    pub fn as_f64(&self) -> f64 {
        self.value_or(f64::INFINITY)
    }
}

impl fmt::Display for Psnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Psnr::Finite(db) => write!(f, "{:.2} dB", db),
            Psnr::Infinite => f.write_str("inf dB"),
        }
    }
}

/// 원본을 압축본 크기로 좌상단 기준 자른 뒤 평균 제곱 오차
pub fn mse(original: &GrayImage, compressed: &GrayImage) -> Result<f64> {
    let (h, w) = compressed.dims();
    let (oh, ow) = original.dims();
    if h > oh || w > ow {
        return Err(CompressError::invalid(format!(
            "압축본 {}x{}가 원본 {}x{}보다 큼",
            h, w, oh, ow
        )));
    }

    let reference = original.as_array().slice(s![..h, ..w]);
    let sum: f64 = reference
        .iter()
        .zip(compressed.view().iter())
        .map(|(&a, &b)| {
            let diff = f64::from(a) - f64::from(b);
            diff * diff
        })
        .sum();

    Ok(sum / (h * w) as f64)
}

pub fn psnr(original: &GrayImage, compressed: &GrayImage) -> Result<Psnr> {
    Ok(Psnr::from_mse(mse(original, compressed)?))
}

/// 버려지는 계수 비율 (%) = (1 − kept / F²) × 100
///
/// 이미지 내용과 무관하게 F, d로만 정해진다.
pub fn compression_ratio(block_size: usize, threshold: usize) -> Result<f64> {
    if block_size == 0 {
        return Err(CompressError::invalid("블록 크기 F는 1 이상이어야 함"));
    }
    let total = (block_size * block_size) as f64;
    Ok((1.0 - kept_count(block_size, threshold) as f64 / total) * 100.0)
}

/// PSNR 기준 품질 등급
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityGrade {
    Poor,       // ≤ 20 dB
    Acceptable, // > 20 dB
    Good,       // > 30 dB
    Excellent,  // > 40 dB
}

impl QualityGrade {
    pub fn from_psnr(psnr: Psnr) -> Self {
        match psnr {
            Psnr::Infinite => QualityGrade::Excellent,
            Psnr::Finite(db) if db > 40.0 => QualityGrade::Excellent,
            Psnr::Finite(db) if db > 30.0 => QualityGrade::Good,
            Psnr::Finite(db) if db > 20.0 => QualityGrade::Acceptable,
            Psnr::Finite(_) => QualityGrade::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityGrade::Excellent => "excellent",
            QualityGrade::Good => "good",
            QualityGrade::Acceptable => "acceptable",
            QualityGrade::Poor => "poor",
        }
    }
}
