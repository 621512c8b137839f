use std::sync::Arc;

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use super::super::{basis_matrix, BasisCache};

#[test]
fn 기저행렬_직교정규성_테스트() {
    for size in [1, 2, 3, 4, 5, 8, 16, 32, 64] {
        let d = basis_matrix(size).unwrap();
        let product = d.dot(&d.t());
        let identity = Array2::<f64>::eye(size);

        let max_error = product
            .iter()
            .zip(identity.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);

        assert!(max_error < 1e-9, "F={} 직교성 오차: {:.3e}", size, max_error);
    }
    println!("✅ 기저행렬 직교정규성 테스트 통과");
}

#[test]
fn 기저행렬_스케일_테스트() {
    let size = 8;
    let d = basis_matrix(size).unwrap();

    // 0행은 1/√F 상수
    for i in 0..size {
        assert_abs_diff_eq!(d[[0, i]], 1.0 / (size as f64).sqrt(), epsilon = 1e-12);
    }
    // 1행 첫 원소: √(2/F)·cos(π/2F)
    let expected = (2.0 / size as f64).sqrt() * (std::f64::consts::PI / 16.0).cos();
    assert_abs_diff_eq!(d[[1, 0]], expected, epsilon = 1e-12);
}

#[test]
fn 기저행렬_크기0_오류_테스트() {
    let err = basis_matrix(0).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn 기저캐시_재사용_테스트() {
    let cache = BasisCache::new();
    assert!(cache.is_empty());

    let a = cache.get_or_build(8).unwrap();
    let b = cache.get_or_build(8).unwrap();
    assert!(Arc::ptr_eq(&a, &b), "같은 크기는 같은 행렬을 공유해야 함");

    cache.get_or_build(16).unwrap();
    assert_eq!(cache.len(), 2);
    assert!(cache.contains(16));

    assert!(cache.get_or_build(0).is_err());
    assert_eq!(cache.len(), 2, "실패한 요청은 캐시에 남지 않음");

    cache.clear();
    assert!(cache.is_empty());
}
