//! 시드 고정 합성 이미지 / 격자 생성기
//!
//! 외부 이미지 디코더 없이 압축 파이프라인과 벤치마크를 돌리기 위한 입력.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use noise::{NoiseFn, Perlin};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::error::{CompressError, Result};
use crate::core::image::GrayImage;

/// 대각선 방향 밝기 기울기
pub fn gradient(height: usize, width: usize) -> Result<GrayImage> {
    let span = (height + width).saturating_sub(2).max(1) as f64;
    let pixels = Array2::from_shape_fn((height, width), |(i, j)| {
        ((i + j) as f64 / span * 255.0).round() as u8
    });
    GrayImage::from_array(pixels)
}

/// cell 크기 흑백 체커보드 (0 / 255)
pub fn checkerboard(height: usize, width: usize, cell: usize) -> Result<GrayImage> {
    if cell == 0 {
        return Err(CompressError::invalid("체커보드 칸 크기는 1 이상이어야 함"));
    }
    let pixels = Array2::from_shape_fn((height, width), |(i, j)| {
        if (i / cell + j / cell) % 2 == 0 {
            0
        } else {
            255
        }
    });
    GrayImage::from_array(pixels)
}

/// 균등 분포 잡음
pub fn uniform_noise(height: usize, width: usize, seed: u64) -> Result<GrayImage> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = Array2::from_shape_fn((height, width), |_| rng.gen::<u8>());
    GrayImage::from_array(pixels)
}

/// 두 옥타브 Perlin 잡음: 자연 이미지처럼 저주파 에너지가 큰 입력
pub fn perlin(height: usize, width: usize, seed: u32, scale: f64) -> Result<GrayImage> {
    if scale.is_nan() || scale <= 0.0 {
        return Err(CompressError::invalid("Perlin 스케일은 양수여야 함"));
    }
    let base = Perlin::new(seed);
    let detail = Perlin::new(seed.wrapping_add(1));
    let pixels = Array2::from_shape_fn((height, width), |(i, j)| {
        let x = j as f64 / scale;
        let y = i as f64 / scale;
        let v = 0.75 * base.get([x, y]) + 0.25 * detail.get([x * 4.0, y * 4.0]);
        ((v * 0.5 + 0.5) * 255.0).round().clamp(0.0, 255.0) as u8
    });
    GrayImage::from_array(pixels)
}

/// [-1, 1) 균등 분포 실수 정사각형 격자 (변환 벤치마크 입력)
pub fn random_grid(size: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((size, size), |_| rng.gen_range(-1.0..1.0))
}

/// 8×8 기준 블록 (DC 계수 1118.75)
pub const REFERENCE_BLOCK: [[u8; 8]; 8] = [
    [231, 32, 233, 161, 24, 71, 140, 245],
    [247, 40, 248, 245, 124, 204, 36, 107],
    [234, 202, 245, 167, 9, 217, 239, 173],
    [193, 190, 100, 167, 43, 180, 8, 70],
    [11, 24, 210, 177, 81, 243, 8, 112],
    [97, 195, 203, 47, 125, 114, 165, 181],
    [193, 70, 174, 167, 41, 30, 127, 245],
    [87, 149, 57, 192, 65, 129, 178, 228],
];

pub fn reference_block() -> Array2<f64> {
    Array2::from_shape_fn((8, 8), |(i, j)| f64::from(REFERENCE_BLOCK[i][j]))
}

/// CLI에서 고르는 합성 패턴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntheticPattern {
    Gradient,
    Checker,
    Noise,
    Perlin,
}

impl SyntheticPattern {
    pub const ALL: [SyntheticPattern; 4] = [
        SyntheticPattern::Gradient,
        SyntheticPattern::Checker,
        SyntheticPattern::Noise,
        SyntheticPattern::Perlin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SyntheticPattern::Gradient => "gradient",
            SyntheticPattern::Checker => "checker",
            SyntheticPattern::Noise => "noise",
            SyntheticPattern::Perlin => "perlin",
        }
    }

    pub fn generate(&self, height: usize, width: usize, seed: u64) -> Result<GrayImage> {
        match self {
            SyntheticPattern::Gradient => gradient(height, width),
            SyntheticPattern::Checker => checkerboard(height, width, 8),
            SyntheticPattern::Noise => uniform_noise(height, width, seed),
            SyntheticPattern::Perlin => perlin(height, width, seed as u32, 32.0),
        }
    }
}

impl fmt::Display for SyntheticPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SyntheticPattern {
    type Err = CompressError;

    fn from_str(s: &str) -> Result<Self> {
        SyntheticPattern::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CompressError::invalid(format!(
                    "알 수 없는 패턴: {} (gradient | checker | noise | perlin)",
                    s
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn 합성이미지_크기_테스트() {
        for pattern in SyntheticPattern::ALL {
            let image = pattern.generate(20, 30, 1).unwrap();
            assert_eq!(image.dims(), (20, 30), "{}", pattern);
        }
        assert!(gradient(0, 10).is_err());
        assert!(checkerboard(8, 8, 0).is_err());
        assert!(perlin(8, 8, 0, 0.0).is_err());
    }

    #[test]
    fn 시드_결정성_테스트() {
        assert_eq!(uniform_noise(16, 16, 3).unwrap(), uniform_noise(16, 16, 3).unwrap());
        assert_ne!(uniform_noise(16, 16, 3).unwrap(), uniform_noise(16, 16, 4).unwrap());
        assert_eq!(random_grid(8, 1), random_grid(8, 1));
    }

    #[test]
    fn 기울기_양끝_테스트() {
        let image = gradient(16, 16).unwrap();
        assert_eq!(image.get(0, 0), Some(0));
        assert_eq!(image.get(15, 15), Some(255));
    }

    #[test]
    fn 패턴_파싱_테스트() {
        assert_eq!("Perlin".parse::<SyntheticPattern>().unwrap(), SyntheticPattern::Perlin);
        assert!("photo".parse::<SyntheticPattern>().is_err());
    }
}
