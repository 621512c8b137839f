//! 8비트 그레이스케일 이미지 (단일 밝기 평면)

use ndarray::{s, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use super::error::{CompressError, Result};

/// 행 우선 (H, W) 8비트 밝기 격자
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrayImage {
    pixels: Array2<u8>,
}

impl GrayImage {
    /// 행 우선 바이트 버퍼로부터 이미지 생성
    pub fn from_vec(height: usize, width: usize, data: Vec<u8>) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(CompressError::invalid(format!(
                "이미지 크기는 0일 수 없음: {}x{}",
                height, width
            )));
        }
        let len = data.len();
        let pixels = Array2::from_shape_vec((height, width), data).map_err(|_| {
            CompressError::invalid(format!(
                "버퍼 길이({})가 {}x{}와 일치하지 않음",
                len, height, width
            ))
        })?;
        Ok(Self { pixels })
    }

    pub fn from_array(pixels: Array2<u8>) -> Result<Self> {
        let (h, w) = pixels.dim();
        if h == 0 || w == 0 {
            return Err(CompressError::invalid(format!(
                "이미지 크기는 0일 수 없음: {}x{}",
                h, w
            )));
        }
        Ok(Self { pixels })
    }

    /// 모든 픽셀이 같은 값인 이미지
    pub fn filled(height: usize, width: usize, value: u8) -> Result<Self> {
        Self::from_vec(height, width, vec![value; height * width])
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// (높이, 너비)
    pub fn dims(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.pixels.get((row, col)).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.pixels
    }

    /// 행 우선 바이트 버퍼로 변환
    pub fn into_vec(self) -> Vec<u8> {
        self.pixels.iter().copied().collect()
    }

    /// 좌상단 기준으로 잘라낸 사본
    ///
    /// 요청 크기가 현재 크기보다 크면 `InvalidArgument`.
    pub fn crop_top_left(&self, height: usize, width: usize) -> Result<GrayImage> {
        let (h, w) = self.dims();
        if height == 0 || width == 0 || height > h || width > w {
            return Err(CompressError::invalid(format!(
                "{}x{} 이미지를 {}x{}로 자를 수 없음",
                h, w, height, width
            )));
        }
        Ok(GrayImage {
            pixels: self.pixels.slice(s![..height, ..width]).to_owned(),
        })
    }
}
