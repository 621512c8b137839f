//! # 2D 주파수 변환
//!
//! 정사각형 블록에 대한 직교 정규 DCT-II / DCT-III.
//! 두 가지 구현을 같은 [`BlockTransform`] 인터페이스 뒤에 둔다.
//!
//! - [`DirectTransform`]: 기저 행렬 곱 (O(F³), 검증 기준)
//! - [`FastTransform`]: 1D DCT를 열/행 방향으로 분리 적용 (O(F²·logF))

pub mod basis;
pub mod direct;
pub mod fast;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

pub use basis::{basis_matrix, BasisCache};
pub use direct::DirectTransform;
pub use fast::FastTransform;

use crate::core::error::{CompressError, Result};

/// 정사각형 블록에 대한 2D 순/역변환
pub trait BlockTransform: Send + Sync {
    /// 구현 종류
    fn kind(&self) -> TransformKind;

    /// 블록 → 계수 격자
    fn forward(&self, grid: ArrayView2<'_, f64>) -> Result<Array2<f64>>;

    /// 계수 격자 → 블록
    fn inverse(&self, coeffs: ArrayView2<'_, f64>) -> Result<Array2<f64>>;

    /// 직교 정규 1D DCT-II
    fn forward_1d(&self, signal: &[f64]) -> Result<Vec<f64>>;
}

/// 변환 구현 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// D·X·Dᵗ 행렬 곱
    Direct,
    /// rustdct 분리형 변환
    Fast,
}

impl TransformKind {
    pub const ALL: [TransformKind; 2] = [TransformKind::Direct, TransformKind::Fast];

    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Direct => "direct",
            TransformKind::Fast => "fast",
        }
    }
}

impl Default for TransformKind {
    fn default() -> Self {
        TransformKind::Fast
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = CompressError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "direct" | "naive" | "matrix" => Ok(TransformKind::Direct),
            "fast" | "separable" => Ok(TransformKind::Fast),
            other => Err(CompressError::invalid(format!(
                "알 수 없는 변환 종류: {} (direct | fast)",
                other
            ))),
        }
    }
}

/// 호출자가 고르는 변환 엔진
#[derive(Debug)]
pub enum TransformEngine {
    Direct(DirectTransform),
    Fast(FastTransform),
}

impl TransformEngine {
    /// 기저 캐시를 주입해 엔진 생성 (빠른 변환은 캐시를 쓰지 않음)
    pub fn new(kind: TransformKind, cache: Arc<BasisCache>) -> Self {
        match kind {
            TransformKind::Direct => TransformEngine::Direct(DirectTransform::new(cache)),
            TransformKind::Fast => TransformEngine::Fast(FastTransform::new()),
        }
    }

    pub fn direct() -> Self {
        TransformEngine::Direct(DirectTransform::default())
    }

    pub fn fast() -> Self {
        TransformEngine::Fast(FastTransform::new())
    }

    fn inner(&self) -> &dyn BlockTransform {
        match self {
            TransformEngine::Direct(t) => t,
            TransformEngine::Fast(t) => t,
        }
    }
}

impl From<TransformKind> for TransformEngine {
    fn from(kind: TransformKind) -> Self {
        TransformEngine::new(kind, Arc::new(BasisCache::new()))
    }
}

impl BlockTransform for TransformEngine {
    fn kind(&self) -> TransformKind {
        self.inner().kind()
    }

    fn forward(&self, grid: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        self.inner().forward(grid)
    }

    fn inverse(&self, coeffs: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        self.inner().inverse(coeffs)
    }

    fn forward_1d(&self, signal: &[f64]) -> Result<Vec<f64>> {
        self.inner().forward_1d(signal)
    }
}

/// 정사각형 격자인지 확인하고 한 변의 길이를 반환
pub(crate) fn ensure_square(grid: &ArrayView2<'_, f64>) -> Result<usize> {
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return Err(CompressError::invalid("빈 격자는 변환할 수 없음"));
    }
    if rows != cols {
        return Err(CompressError::invalid(format!(
            "정사각형 블록이 필요함: {}x{}",
            rows, cols
        )));
    }
    Ok(rows)
}

/// 선택한 구현으로 1D 직교 정규 DCT-II
pub fn transform_1d(kind: TransformKind, signal: &[f64]) -> Result<Vec<f64>> {
    TransformEngine::from(kind).forward_1d(signal)
}

/// 두 격자의 최대 절대 차이
pub fn max_abs_diff(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>) -> Result<f64> {
    if a.dim() != b.dim() {
        return Err(CompressError::invalid(format!(
            "격자 크기 불일치: {:?} vs {:?}",
            a.dim(),
            b.dim()
        )));
    }
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max))
}

/// 두 구현의 순변환 결과가 허용 오차 안에서 같은지 검증
///
/// 최대 절대 차이를 반환하고, 넘으면 `NumericTolerance`.
pub fn verify_equivalence(
    reference: &dyn BlockTransform,
    candidate: &dyn BlockTransform,
    grid: ArrayView2<'_, f64>,
    tolerance: f64,
) -> Result<f64> {
    let expected = reference.forward(grid)?;
    let actual = candidate.forward(grid)?;
    let max_error = max_abs_diff(expected.view(), actual.view())?;
    if max_error > tolerance {
        return Err(CompressError::NumericTolerance {
            context: format!(
                "{} vs {} forward ({}x{})",
                reference.kind(),
                candidate.kind(),
                grid.nrows(),
                grid.ncols()
            ),
            max_error,
            tolerance,
        });
    }
    Ok(max_error)
}

/// inverse(forward(X)) ≈ X 검증
pub fn verify_round_trip(
    engine: &dyn BlockTransform,
    grid: ArrayView2<'_, f64>,
    tolerance: f64,
) -> Result<f64> {
    let coeffs = engine.forward(grid)?;
    let restored = engine.inverse(coeffs.view())?;
    let max_error = max_abs_diff(grid, restored.view())?;
    if max_error > tolerance {
        return Err(CompressError::NumericTolerance {
            context: format!("{} round trip ({}x{})", engine.kind(), grid.nrows(), grid.ncols()),
            max_error,
            tolerance,
        });
    }
    Ok(max_error)
}

#[cfg(test)]
mod __tests__;
