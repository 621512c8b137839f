//! F × d 조합 실험 격자

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::analyzer::{QualityAnalyzer, QualityReport};
use crate::core::compressor::BlockCompressor;
use crate::core::error::{CompressError, Result};
use crate::core::image::GrayImage;
use crate::core::mask::max_threshold;

/// 단일 F에서 훑어볼 기본 임계값들
pub const DEFAULT_SWEEP: [i64; 6] = [1, 2, 4, 8, 12, 14];

/// 실험 계획: 각 F마다 d = ⌊비율 · (2F−2)⌋ (0이면 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentPlan {
    pub block_sizes: Vec<usize>,
    pub threshold_fractions: Vec<f64>,
}

impl Default for ExperimentPlan {
    fn default() -> Self {
        Self {
            block_sizes: vec![4, 8, 16],
            threshold_fractions: vec![0.25, 0.5, 0.75, 1.0],
        }
    }
}

impl ExperimentPlan {
    /// (비율, d) 쌍
    pub fn thresholds(&self, block_size: usize) -> Vec<(f64, usize)> {
        let d_max = max_threshold(block_size) as f64;
        self.threshold_fractions
            .iter()
            .map(|&fraction| {
                let d = (fraction * d_max).floor() as usize;
                (fraction, d.max(1))
            })
            .collect()
    }

    /// 실제로 실행될 압축 횟수 (블록보다 작은 이미지 제외)
    pub fn run_count(&self, images: &[(String, GrayImage)]) -> usize {
        images
            .iter()
            .map(|(_, image)| {
                let (h, w) = image.dims();
                self.block_sizes
                    .iter()
                    .filter(|&&f| f > 0 && h >= f && w >= f)
                    .count()
                    * self.threshold_fractions.len()
            })
            .sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_sizes.iter().any(|&f| f == 0) {
            return Err(CompressError::invalid("블록 크기 F는 1 이상이어야 함"));
        }
        if self
            .threshold_fractions
            .iter()
            .any(|f| !(0.0..=1.0).contains(f))
        {
            return Err(CompressError::invalid("임계값 비율은 [0, 1] 범위여야 함"));
        }
        Ok(())
    }
}

/// 실험 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub image: String,
    /// d / d_max 비율
    pub fraction: f64,
    pub report: QualityReport,
}

/// 실험 요약 (무한 PSNR은 100 dB로 계산)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub count: usize,
    pub mean_psnr_db: f64,
    pub best_psnr_db: f64,
    pub worst_psnr_db: f64,
}

impl ExperimentSummary {
    pub fn from_records(records: &[ExperimentRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let values: Vec<f64> = records.iter().map(|r| r.report.psnr_db()).collect();
        Some(Self {
            count: values.len(),
            mean_psnr_db: values.iter().sum::<f64>() / values.len() as f64,
            best_psnr_db: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            worst_psnr_db: values.iter().copied().fold(f64::INFINITY, f64::min),
        })
    }
}

/// 이미지 × F × d 전체 실험
///
/// 블록보다 작은 이미지와 F 조합은 건너뛴다.
pub fn run_experiments(
    images: &[(String, GrayImage)],
    plan: &ExperimentPlan,
    compressor: &BlockCompressor,
) -> Result<Vec<ExperimentRecord>> {
    run_experiments_with_progress(images, plan, compressor, |_| {})
}

/// 각 행이 끝날 때마다 `on_record` 호출
pub fn run_experiments_with_progress(
    images: &[(String, GrayImage)],
    plan: &ExperimentPlan,
    compressor: &BlockCompressor,
    mut on_record: impl FnMut(&ExperimentRecord),
) -> Result<Vec<ExperimentRecord>> {
    plan.validate()?;
    let mut records = Vec::new();

    for (name, image) in images {
        let (h, w) = image.dims();
        for &block_size in &plan.block_sizes {
            if h < block_size || w < block_size {
                warn!("{} ({}x{}): F={}보다 작아 건너뜀", name, h, w, block_size);
                continue;
            }
            for (fraction, threshold) in plan.thresholds(block_size) {
                let compressed = compressor.compress_with(image, block_size, threshold as i64)?;
                let report =
                    QualityAnalyzer::report(image, &compressed, block_size, threshold as i64)?;
                debug!(
                    "{}: F={}, d={} → PSNR {}, 압축률 {:.1}%",
                    name, block_size, threshold, report.psnr, report.compression_ratio
                );
                let record = ExperimentRecord {
                    image: name.clone(),
                    fraction,
                    report,
                };
                on_record(&record);
                records.push(record);
            }
        }
    }

    Ok(records)
}

/// 고정 F에서 여러 d로 압축한 보고서들
pub fn threshold_sweep(
    image: &GrayImage,
    block_size: usize,
    thresholds: &[i64],
    compressor: &BlockCompressor,
) -> Result<Vec<QualityReport>> {
    thresholds
        .iter()
        .map(|&d| {
            let compressed = compressor.compress_with(image, block_size, d)?;
            QualityAnalyzer::report(image, &compressed, block_size, d)
        })
        .collect()
}
