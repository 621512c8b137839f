//! # 대각선 주파수 마스크
//!
//! 계수 (k, l)은 k + l < d 일 때만 남는다.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::core::error::{CompressError, Result};

/// 블록 크기 F에서 의미 있는 최대 임계값 2F−2
pub fn max_threshold(block_size: usize) -> usize {
    (2 * block_size).saturating_sub(2)
}

/// 임계값 d를 [0, 2F−2]로 자름
///
/// 편집기와 같은 정책. (F−1, F−1) 계수는 압축 경로에서 항상 버려진다.
pub fn clamp_threshold(block_size: usize, threshold: i64) -> usize {
    let upper = max_threshold(block_size) as i64;
    threshold.clamp(0, upper) as usize
}

/// |{(k, l) ∈ [0, F)² : k + l < d}|
pub fn kept_count(block_size: usize, threshold: usize) -> usize {
    if block_size == 0 {
        return 0;
    }
    // 대각선 s = k + l 위의 칸 수는 min(s, 2F−2−s) + 1
    let diagonals = threshold.min(2 * block_size - 1);
    (0..diagonals)
        .map(|s| s.min(2 * block_size - 2 - s) + 1)
        .sum()
}

/// 블록 크기와 임계값으로 정해지는 계수 보존 마스크
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyMask {
    block_size: usize,
    threshold: usize,
}

impl FrequencyMask {
    /// 마스크 생성. d는 자르지 않으며 2F−1 이상이면 모든 계수를 남긴다.
    pub fn new(block_size: usize, threshold: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(CompressError::invalid("블록 크기 F는 1 이상이어야 함"));
        }
        Ok(Self {
            block_size,
            threshold,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// (k, l) 계수를 남기는지 여부
    #[inline]
    pub fn retains(&self, k: usize, l: usize) -> bool {
        k < self.block_size && l < self.block_size && k + l < self.threshold
    }

    pub fn kept_count(&self) -> usize {
        kept_count(self.block_size, self.threshold)
    }

    pub fn total_count(&self) -> usize {
        self.block_size * self.block_size
    }

    pub fn discarded_count(&self) -> usize {
        self.total_count() - self.kept_count()
    }

    /// 버려지지 않는 계수가 없는지 (d ≥ 2F−1)
    pub fn retains_all(&self) -> bool {
        self.kept_count() == self.total_count()
    }

    /// 남지 않는 계수를 0으로 만든다
    pub fn apply(&self, coeffs: &mut Array2<f64>) -> Result<()> {
        if coeffs.dim() != (self.block_size, self.block_size) {
            return Err(CompressError::invalid(format!(
                "계수 격자 {:?}가 마스크 크기 {}와 맞지 않음",
                coeffs.dim(),
                self.block_size
            )));
        }
        for ((k, l), value) in coeffs.indexed_iter_mut() {
            if !self.retains(k, l) {
                *value = 0.0;
            }
        }
        Ok(())
    }

    /// 1 = 보존, 0 = 제거
    pub fn to_array(&self) -> Array2<u8> {
        Array2::from_shape_fn((self.block_size, self.block_size), |(k, l)| {
            self.retains(k, l) as u8
        })
    }

    /// `#` 보존 / `.` 제거, 행마다 한 줄
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.block_size * (self.block_size + 1));
        for k in 0..self.block_size {
            for l in 0..self.block_size {
                out.push(if self.retains(k, l) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod __tests__;
