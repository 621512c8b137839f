//! 블록 단위 DCT 압축기

use std::sync::Arc;

use log::{debug, warn};
use ndarray::{s, Array2, ArrayView2};
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::core::config::CompressionConfig;
use crate::core::error::{CompressError, Result};
use crate::core::image::GrayImage;
use crate::core::mask::{clamp_threshold, max_threshold, FrequencyMask};
use crate::core::transform::{BasisCache, BlockTransform, TransformEngine};

/// 블록 격자 배치: ⌊H/F⌋ × ⌊W/F⌋, 나머지 행/열은 버린다
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub block_size: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
}

impl BlockLayout {
    pub fn for_image(height: usize, width: usize, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(CompressError::invalid("블록 크기 F는 1 이상이어야 함"));
        }
        if height < block_size || width < block_size {
            return Err(CompressError::invalid(format!(
                "{}x{} 이미지가 블록 크기 {}보다 작음",
                height, width, block_size
            )));
        }
        Ok(Self {
            block_size,
            grid_rows: height / block_size,
            grid_cols: width / block_size,
        })
    }

    pub fn block_count(&self) -> usize {
        self.grid_rows * self.grid_cols
    }

    /// 출력 이미지 크기 (⌊H/F⌋·F, ⌊W/F⌋·F)
    pub fn output_dims(&self) -> (usize, usize) {
        (
            self.grid_rows * self.block_size,
            self.grid_cols * self.block_size,
        )
    }

    /// 블록 번호 → 픽셀 시작 위치
    pub fn origin(&self, block_idx: usize) -> (usize, usize) {
        let grid_i = block_idx / self.grid_cols;
        let grid_j = block_idx % self.grid_cols;
        (grid_i * self.block_size, grid_j * self.block_size)
    }
}

/// 실수 값을 8비트 범위로: 반올림 후 [0, 255]로 자름
///
/// 반올림은 짝수 쪽 (numpy `round`와 같은 규칙).
#[inline]
pub fn quantize(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// 블록 분해 → 변환 → 마스크 → 역변환 → 양자화 → 재조립
pub struct BlockCompressor {
    config: CompressionConfig,
    engine: TransformEngine,
    pool: Option<ThreadPool>,
}

impl std::fmt::Debug for BlockCompressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockCompressor")
            .field("config", &self.config)
            .field("engine", &self.engine.kind())
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl BlockCompressor {
    pub fn new(config: CompressionConfig) -> Result<Self> {
        Self::with_cache(config, Arc::new(BasisCache::new()))
    }

    /// 기저 캐시를 공유하는 압축기
    pub fn with_cache(config: CompressionConfig, cache: Arc<BasisCache>) -> Result<Self> {
        config.validate()?;
        let engine = TransformEngine::new(config.strategy, cache);

        let pool = match (config.parallel, config.num_threads) {
            (true, Some(threads)) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        CompressError::invalid(format!("스레드 풀 생성 실패: {}", e))
                    })?,
            ),
            _ => None,
        };

        Ok(Self {
            config,
            engine,
            pool,
        })
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    pub fn engine(&self) -> &TransformEngine {
        &self.engine
    }

    /// 설정의 F, d로 이미지 압축
    pub fn compress(&self, image: &GrayImage) -> Result<GrayImage> {
        self.compress_with(image, self.config.block_size, self.config.threshold)
    }

    /// 임의의 F, d로 이미지 압축 (엔진과 병렬 설정은 공유)
    pub fn compress_with(
        &self,
        image: &GrayImage,
        block_size: usize,
        threshold: i64,
    ) -> Result<GrayImage> {
        let (height, width) = image.dims();
        let layout = BlockLayout::for_image(height, width, block_size)?;

        let effective = clamp_threshold(block_size, threshold);
        if effective as i64 != threshold {
            warn!(
                "임계값 d={}를 F={} 범위 [0, {}]로 자름 → {}",
                threshold,
                block_size,
                max_threshold(block_size),
                effective
            );
        }
        let mask = FrequencyMask::new(block_size, effective)?;

        let (out_h, out_w) = layout.output_dims();
        if (out_h, out_w) != (height, width) {
            warn!(
                "블록 격자 밖 픽셀 버림: {}x{} → {}x{}",
                height, width, out_h, out_w
            );
        }
        debug!(
            "압축 시작: {}x{}, F={}, d={}, 블록 {}개, 변환={}, 병렬={}",
            height,
            width,
            block_size,
            effective,
            layout.block_count(),
            self.engine.kind(),
            self.config.parallel
        );

        let source = image.view();
        let blocks = self.process_blocks(&source, &layout, &mask)?;

        let mut output = Array2::<u8>::zeros((out_h, out_w));
        for (block_idx, block) in blocks.into_iter().enumerate() {
            let (row, col) = layout.origin(block_idx);
            output
                .slice_mut(s![row..row + block_size, col..col + block_size])
                .assign(&block);
        }

        GrayImage::from_array(output)
    }

    fn process_blocks(
        &self,
        source: &ArrayView2<'_, u8>,
        layout: &BlockLayout,
        mask: &FrequencyMask,
    ) -> Result<Vec<Array2<u8>>> {
        let run_one = |block_idx: usize| -> Result<Array2<u8>> {
            let (row, col) = layout.origin(block_idx);
            let f = layout.block_size;
            let block = source
                .slice(s![row..row + f, col..col + f])
                .mapv(f64::from);
            let restored = self.compress_block(block.view(), mask)?;
            Ok(restored.mapv(quantize))
        };

        let count = layout.block_count();
        if !self.config.parallel {
            return (0..count).map(run_one).collect();
        }

        let run_all = || -> Result<Vec<Array2<u8>>> {
            (0..count).into_par_iter().map(run_one).collect()
        };
        match &self.pool {
            Some(pool) => pool.install(run_all),
            None => run_all(),
        }
    }

    /// 한 블록의 순변환 → 마스크 → 역변환 (양자화 전 실수 값)
    pub fn compress_block(
        &self,
        block: ArrayView2<'_, f64>,
        mask: &FrequencyMask,
    ) -> Result<Array2<f64>> {
        let mut coeffs = self.engine.forward(block)?;
        mask.apply(&mut coeffs)?;
        self.engine.inverse(coeffs.view())
    }
}

/// 기본(빠른, 병렬) 압축기로 한 번 압축
pub fn compress(image: &GrayImage, block_size: usize, threshold: i64) -> Result<GrayImage> {
    BlockCompressor::new(CompressionConfig::new(block_size, threshold))?.compress(image)
}
