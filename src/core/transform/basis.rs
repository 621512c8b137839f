//! 직교 정규 DCT-II 기저 행렬과 크기별 캐시

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;

use ndarray::Array2;
use parking_lot::RwLock;

use crate::core::error::{CompressError, Result};

/// F×F 직교 정규 기저 행렬 D 생성
///
/// D[k][i] = c_k · cos(π(2i+1)k / 2F), c_0 = 1/√F, c_k = √(2/F).
/// 순변환은 D · X · Dᵗ, 역변환은 같은 행렬의 전치를 쓴다.
pub fn basis_matrix(size: usize) -> Result<Array2<f64>> {
    if size == 0 {
        return Err(CompressError::invalid("블록 크기 F는 1 이상이어야 함"));
    }

    let n = size as f64;
    let dc_scale = (1.0 / n).sqrt();
    let ac_scale = (2.0 / n).sqrt();

    Ok(Array2::from_shape_fn((size, size), |(k, i)| {
        let scale = if k == 0 { dc_scale } else { ac_scale };
        scale * (PI * (2 * i + 1) as f64 * k as f64 / (2.0 * n)).cos()
    }))
}

/// 블록 크기별 기저 행렬 캐시
///
/// 생성 후에는 읽기 전용이므로 여러 블록 작업자가 `Arc`로 공유한다.
#[derive(Debug, Default)]
pub struct BasisCache {
    matrices: RwLock<HashMap<usize, Arc<Array2<f64>>>>,
}

impl BasisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 캐시된 행렬을 돌려주거나 새로 만들어 저장
    pub fn get_or_build(&self, size: usize) -> Result<Arc<Array2<f64>>> {
        if let Some(matrix) = self.matrices.read().get(&size) {
            return Ok(Arc::clone(matrix));
        }

        let built = Arc::new(basis_matrix(size)?);
        let mut guard = self.matrices.write();
        // 다른 스레드가 먼저 넣었을 수 있음
        let entry = guard.entry(size).or_insert(built);
        Ok(Arc::clone(entry))
    }

    pub fn contains(&self, size: usize) -> bool {
        self.matrices.read().contains_key(&size)
    }

    pub fn len(&self) -> usize {
        self.matrices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.read().is_empty()
    }

    pub fn clear(&self) {
        self.matrices.write().clear();
    }
}
