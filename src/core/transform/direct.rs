//! 행렬 곱 기반 2D DCT (O(F³) 기준 구현)

use std::sync::Arc;

use ndarray::{Array1, Array2, ArrayView2};

use super::basis::BasisCache;
use super::{ensure_square, BlockTransform, TransformKind};
use crate::core::error::{CompressError, Result};

/// 직접 행렬 곱 변환: forward = D·X·Dᵗ, inverse = Dᵗ·C·D
///
/// 빠른 변환의 정답 기준으로 쓰인다. 큰 F에서는 세제곱으로 느려진다.
#[derive(Debug, Clone, Default)]
pub struct DirectTransform {
    cache: Arc<BasisCache>,
}

impl DirectTransform {
    pub fn new(cache: Arc<BasisCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<BasisCache> {
        &self.cache
    }
}

impl BlockTransform for DirectTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Direct
    }

    fn forward(&self, grid: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let size = ensure_square(&grid)?;
        let d = self.cache.get_or_build(size)?;
        Ok(d.dot(&grid).dot(&d.t()))
    }

    fn inverse(&self, coeffs: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let size = ensure_square(&coeffs)?;
        let d = self.cache.get_or_build(size)?;
        Ok(d.t().dot(&coeffs).dot(&*d))
    }

    fn forward_1d(&self, signal: &[f64]) -> Result<Vec<f64>> {
        if signal.is_empty() {
            return Err(CompressError::invalid("빈 신호는 변환할 수 없음"));
        }
        let d = self.cache.get_or_build(signal.len())?;
        let x = Array1::from(signal.to_vec());
        Ok(d.dot(&x).to_vec())
    }
}
