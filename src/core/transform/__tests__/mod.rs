pub mod basis_test;

use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// 시드 고정 무작위 정사각형 격자 (-128..128)
pub fn 무작위_격자(size: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((size, size), |_| rng.gen_range(-128.0..128.0))
}

/// 8×8 기준 블록
pub fn 기준_블록() -> Array2<f64> {
    crate::core::synthetic::reference_block()
}

/// 기준 블록의 2D DCT (유효숫자 3자리)
pub fn 기준_계수() -> Array2<f64> {
    let rows: [[f64; 8]; 8] = [
        [1.11e+03, 4.40e+01, 7.59e+01, -1.38e+02, 3.50e+00, 1.22e+02, 1.95e+02, -1.01e+02],
        [7.71e+01, 1.14e+02, -2.18e+01, 4.13e+01, 8.77e+00, 9.90e+01, 1.38e+02, 1.09e+01],
        [4.48e+01, -6.27e+01, 1.11e+02, -7.63e+01, 1.24e+02, 9.55e+01, -3.98e+01, 5.85e+01],
        [-6.99e+01, -4.02e+01, -2.34e+01, -7.67e+01, 2.66e+01, -3.68e+01, 6.61e+01, 1.25e+02],
        [-1.09e+02, -4.33e+01, -5.55e+01, 8.17e+00, 3.02e+01, -2.86e+01, 2.44e+00, -9.41e+01],
        [-5.38e+00, 5.66e+01, 1.73e+02, -3.54e+01, 3.23e+01, 3.34e+01, -5.81e+01, 1.90e+01],
        [7.88e+01, -6.45e+01, 1.18e+02, -1.50e+01, -1.37e+02, -3.06e+01, -1.05e+02, 3.98e+01],
        [1.97e+01, -7.81e+01, 9.72e-01, -7.23e+01, -2.15e+01, 8.13e+01, 6.37e+01, 5.90e+00],
    ];
    Array2::from_shape_fn((8, 8), |(i, j)| rows[i][j])
}
