//! rustdct 기반 분리형 2D DCT (O(F²·logF))

use std::collections::HashMap;
use std::sync::Arc;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use parking_lot::RwLock;
use rustdct::{Dct2, Dct3, DctPlanner, TransformType2And3};

use super::{ensure_square, BlockTransform, TransformKind};
use crate::core::error::{CompressError, Result};

type DctPlan = Arc<dyn TransformType2And3<f64>>;

/// 열 방향 1D DCT 후 행 방향 1D DCT를 적용하는 분리형 변환
///
/// rustdct 커널은 정규화되지 않았으므로 직교 정규 스케일을 앞뒤로 곱한다.
#[derive(Default)]
pub struct FastTransform {
    plans: RwLock<HashMap<usize, DctPlan>>,
}

impl std::fmt::Debug for FastTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastTransform")
            .field("planned_sizes", &self.plans.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FastTransform {
    pub fn new() -> Self {
        Self::default()
    }

    fn plan(&self, len: usize) -> DctPlan {
        if let Some(plan) = self.plans.read().get(&len) {
            return Arc::clone(plan);
        }
        let mut planner = DctPlanner::new();
        let plan = planner.plan_dct2(len);
        let mut guard = self.plans.write();
        Arc::clone(guard.entry(len).or_insert(plan))
    }
}

/// 직교 정규 DCT-II (제자리)
fn dct2_ortho(plan: &DctPlan, buffer: &mut [f64]) {
    plan.process_dct2(buffer);
    let n = buffer.len() as f64;
    let dc_scale = (1.0 / n).sqrt();
    let ac_scale = (2.0 / n).sqrt();
    buffer[0] *= dc_scale;
    for value in buffer.iter_mut().skip(1) {
        *value *= ac_scale;
    }
}

/// 직교 정규 DCT-III (DCT-II의 역변환, 제자리)
fn dct3_ortho(plan: &DctPlan, buffer: &mut [f64]) {
    let n = buffer.len() as f64;
    // rustdct DCT-III는 첫 항을 절반으로 더한다
    buffer[0] *= 2.0 * (1.0 / n).sqrt();
    let ac_scale = (2.0 / n).sqrt();
    for value in buffer.iter_mut().skip(1) {
        *value *= ac_scale;
    }
    plan.process_dct3(buffer);
}

/// 주어진 축을 따라 모든 레인에 1D 변환 적용
fn apply_along_axis(grid: &mut Array2<f64>, axis: Axis, mut op: impl FnMut(&mut [f64])) {
    let mut scratch = Vec::with_capacity(grid.len_of(axis));
    for mut lane in grid.lanes_mut(axis) {
        scratch.clear();
        scratch.extend(lane.iter().copied());
        op(&mut scratch);
        lane.assign(&ArrayView1::from(&scratch[..]));
    }
}

impl BlockTransform for FastTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Fast
    }

    fn forward(&self, grid: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let size = ensure_square(&grid)?;
        let plan = self.plan(size);
        let mut out = grid.to_owned();
        apply_along_axis(&mut out, Axis(0), |col| dct2_ortho(&plan, col));
        apply_along_axis(&mut out, Axis(1), |row| dct2_ortho(&plan, row));
        Ok(out)
    }

    fn inverse(&self, coeffs: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let size = ensure_square(&coeffs)?;
        let plan = self.plan(size);
        let mut out = coeffs.to_owned();
        apply_along_axis(&mut out, Axis(0), |col| dct3_ortho(&plan, col));
        apply_along_axis(&mut out, Axis(1), |row| dct3_ortho(&plan, row));
        Ok(out)
    }

    fn forward_1d(&self, signal: &[f64]) -> Result<Vec<f64>> {
        if signal.is_empty() {
            return Err(CompressError::invalid("빈 신호는 변환할 수 없음"));
        }
        let plan = self.plan(signal.len());
        let mut buffer = signal.to_vec();
        dct2_ortho(&plan, &mut buffer);
        Ok(buffer)
    }
}
