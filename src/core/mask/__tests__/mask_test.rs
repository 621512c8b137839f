use ndarray::Array2;

use super::super::{clamp_threshold, kept_count, max_threshold, FrequencyMask};

/// 정의대로 세는 기준값
fn 직접_세기(size: usize, threshold: usize) -> usize {
    (0..size)
        .flat_map(|k| (0..size).map(move |l| (k, l)))
        .filter(|(k, l)| k + l < threshold)
        .count()
}

#[test]
fn 보존개수_정의_일치_테스트() {
    for size in 1..=16 {
        for threshold in 0..=(2 * size + 2) {
            assert_eq!(
                kept_count(size, threshold),
                직접_세기(size, threshold),
                "F={}, d={}",
                size,
                threshold
            );
        }
    }
}

#[test]
fn 보존개수_단조성_테스트() {
    for size in [2, 4, 8, 16, 32] {
        assert_eq!(kept_count(size, 0), 0);
        assert_eq!(kept_count(size, 2 * size - 1), size * size);

        let mut previous = 0;
        for threshold in 0..=(2 * size) {
            let current = kept_count(size, threshold);
            assert!(current >= previous, "F={} d={}에서 감소", size, threshold);
            previous = current;
        }
    }
    println!("✅ 보존개수 단조성 테스트 통과");
}

#[test]
fn 모서리_계수_테스트() {
    // F=8, d=14: (7,7)만 제거
    let mask = FrequencyMask::new(8, 14).unwrap();
    assert_eq!(mask.kept_count(), 63);
    assert_eq!(mask.discarded_count(), 1);
    assert!(!mask.retains(7, 7));
    assert!(mask.retains(6, 7));
    assert!(mask.retains(7, 6));
    assert!(!mask.retains_all());

    let all = FrequencyMask::new(8, 15).unwrap();
    assert!(all.retains_all());
}

#[test]
fn 임계값_0_테스트() {
    let mask = FrequencyMask::new(8, 0).unwrap();
    assert_eq!(mask.kept_count(), 0);
    assert!(!mask.retains(0, 0));
}

#[test]
fn 임계값_자르기_테스트() {
    assert_eq!(max_threshold(8), 14);
    assert_eq!(max_threshold(1), 0);
    assert_eq!(clamp_threshold(8, -3), 0);
    assert_eq!(clamp_threshold(8, 5), 5);
    assert_eq!(clamp_threshold(8, 14), 14);
    assert_eq!(clamp_threshold(8, 15), 14);
    assert_eq!(clamp_threshold(8, 1000), 14);
}

#[test]
fn 마스크_적용_테스트() {
    let mask = FrequencyMask::new(4, 2).unwrap();
    let mut coeffs = Array2::from_elem((4, 4), 1.0);
    mask.apply(&mut coeffs).unwrap();

    // (0,0), (0,1), (1,0)만 남음
    assert_eq!(coeffs.sum(), 3.0);
    assert_eq!(coeffs[[0, 1]], 1.0);
    assert_eq!(coeffs[[1, 1]], 0.0);

    let mut wrong = Array2::from_elem((3, 3), 1.0);
    assert!(mask.apply(&mut wrong).unwrap_err().is_invalid_argument());
}

#[test]
fn 마스크_시각화_테스트() {
    let mask = FrequencyMask::new(3, 2).unwrap();
    assert_eq!(mask.render(), "##.\n#..\n...\n");

    let array = mask.to_array();
    assert_eq!(array.sum() as usize, mask.kept_count());
    assert_eq!(array[[0, 0]], 1);
    assert_eq!(array[[2, 2]], 0);
}

#[test]
fn 잘못된_블록크기_테스트() {
    assert!(FrequencyMask::new(0, 4).unwrap_err().is_invalid_argument());
    assert_eq!(kept_count(0, 4), 0);
}
