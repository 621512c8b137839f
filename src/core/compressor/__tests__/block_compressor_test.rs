use std::sync::Arc;

use ndarray::Array2;

use super::super::{compress, quantize, BlockCompressor, BlockLayout};
use crate::core::config::CompressionConfig;
use crate::core::image::GrayImage;
use crate::core::mask::FrequencyMask;
use crate::core::synthetic;
use crate::core::transform::{BasisCache, TransformKind};

#[test]
fn 양자화_규칙_테스트() {
    assert_eq!(quantize(-3.7), 0);
    assert_eq!(quantize(255.4), 255);
    assert_eq!(quantize(300.0), 255);
    assert_eq!(quantize(127.5), 128);
    assert_eq!(quantize(126.5), 126);
    // 반올림 후 자름: -0.4 → -0 → 0
    assert_eq!(quantize(-0.4), 0);
    assert_eq!(quantize(254.6), 255);
}

#[test]
fn 블록_배치_테스트() {
    let layout = BlockLayout::for_image(256, 256, 8).unwrap();
    assert_eq!(layout.block_count(), 1024);
    assert_eq!(layout.output_dims(), (256, 256));

    let cropped = BlockLayout::for_image(100, 37, 8).unwrap();
    assert_eq!((cropped.grid_rows, cropped.grid_cols), (12, 4));
    assert_eq!(cropped.output_dims(), (96, 32));
    assert_eq!(cropped.origin(5), (8, 8));

    assert!(BlockLayout::for_image(7, 100, 8).unwrap_err().is_invalid_argument());
    assert!(BlockLayout::for_image(100, 100, 0).is_err());
}

#[test]
fn 균일블록_완전복원_테스트() {
    let image = GrayImage::filled(8, 8, 128).unwrap();
    for kind in TransformKind::ALL {
        let compressor =
            BlockCompressor::new(CompressionConfig::new(8, 1).with_strategy(kind)).unwrap();
        let output = compressor.compress(&image).unwrap();
        assert_eq!(output, image, "{}: 균일 블록은 DC만으로 복원되어야 함", kind);
    }
    println!("✅ 균일블록 완전복원 테스트 통과");
}

#[test]
fn 임계값_0_검은블록_테스트() {
    let image = synthetic::gradient(32, 32).unwrap();
    let output = compress(&image, 8, 0).unwrap();

    // 모든 계수가 0 → 균일한 0 블록
    assert!(output.view().iter().all(|&p| p == 0));
}

#[test]
fn 임계값_1_균일블록_테스트() {
    let image = synthetic::uniform_noise(32, 32, 11).unwrap();
    let output = compress(&image, 8, 1).unwrap();
    let view = output.view();

    for bi in 0..4 {
        for bj in 0..4 {
            let first = view[[bi * 8, bj * 8]];
            for i in 0..8 {
                for j in 0..8 {
                    assert_eq!(view[[bi * 8 + i, bj * 8 + j]], first);
                }
            }
        }
    }
}

#[test]
fn 자르기_결정성_테스트() {
    let image = synthetic::gradient(50, 77).unwrap();
    for block_size in [1usize, 3, 4, 8, 16] {
        for threshold in [0i64, 1, 5, 100] {
            let output = compress(&image, block_size, threshold).unwrap();
            assert_eq!(
                output.dims(),
                ((50 / block_size) * block_size, (77 / block_size) * block_size)
            );
        }
    }
}

#[test]
fn 작은_이미지_오류_테스트() {
    let image = GrayImage::filled(4, 16, 10).unwrap();
    let err = compress(&image, 8, 4).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(BlockCompressor::new(CompressionConfig::new(0, 4)).is_err());
}

#[test]
fn 병렬_순차_동일결과_테스트() {
    let image = synthetic::perlin(64, 48, 5, 24.0).unwrap();

    let sequential = BlockCompressor::new(CompressionConfig::new(8, 6).with_parallel(false))
        .unwrap()
        .compress(&image)
        .unwrap();
    let parallel = BlockCompressor::new(CompressionConfig::new(8, 6).with_threads(3))
        .unwrap()
        .compress(&image)
        .unwrap();
    let global_pool = BlockCompressor::new(CompressionConfig::new(8, 6))
        .unwrap()
        .compress(&image)
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(sequential, global_pool);
}

#[test]
fn 직접_빠른_압축_일치_테스트() {
    let image = synthetic::perlin(64, 64, 9, 16.0).unwrap();
    let cache = Arc::new(BasisCache::new());

    let direct = BlockCompressor::with_cache(CompressionConfig::reference(8, 5), Arc::clone(&cache))
        .unwrap()
        .compress(&image)
        .unwrap();
    let fast = BlockCompressor::new(CompressionConfig::new(8, 5))
        .unwrap()
        .compress(&image)
        .unwrap();

    // 반올림 경계에서만 1 차이가 날 수 있음
    let max_diff = direct
        .view()
        .iter()
        .zip(fast.view().iter())
        .map(|(&a, &b)| (a as i16 - b as i16).abs())
        .max()
        .unwrap_or(0);
    assert!(max_diff <= 1, "직접/빠른 압축 차이 {}", max_diff);
    assert!(cache.contains(8));
}

#[test]
fn 원본_불변_테스트() {
    let image = synthetic::checkerboard(16, 16, 2).unwrap();
    let before = image.clone();
    let _ = compress(&image, 4, 2).unwrap();
    assert_eq!(image, before);
}

#[test]
fn 블록_실수복원_테스트() {
    let compressor = BlockCompressor::new(CompressionConfig::default()).unwrap();
    let block = Array2::from_shape_fn((8, 8), |(i, j)| (i * 8 + j) as f64);

    // 모든 계수를 남기면 원본 그대로
    let all = FrequencyMask::new(8, 15).unwrap();
    let restored = compressor.compress_block(block.view(), &all).unwrap();
    for (a, b) in block.iter().zip(restored.iter()) {
        assert!((a - b).abs() < 1e-10);
    }

    // d=1: 블록 평균값으로 채워짐
    let dc_only = FrequencyMask::new(8, 1).unwrap();
    let flat = compressor.compress_block(block.view(), &dc_only).unwrap();
    let mean = block.mean().unwrap();
    for v in flat.iter() {
        assert!((v - mean).abs() < 1e-9);
    }
}

#[test]
fn 범위밖_임계값_자르기_테스트() {
    let image = synthetic::perlin(32, 32, 1, 8.0).unwrap();
    let clamped = compress(&image, 8, 500).unwrap();
    let max = compress(&image, 8, 14).unwrap();
    assert_eq!(clamped, max);

    let negative = compress(&image, 8, -5).unwrap();
    let zero = compress(&image, 8, 0).unwrap();
    assert_eq!(negative, zero);
}
