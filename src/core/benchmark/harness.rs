//! 변환 구현별 실행 시간 측정

use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;

use log::debug;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::core::config::BenchmarkConfig;
use crate::core::error::Result;
use crate::core::synthetic::random_grid;
use crate::core::transform::{BasisCache, BlockTransform, TransformEngine, TransformKind};

/// 한 크기에서의 측정값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    pub size: usize,
    pub iterations: usize,
    /// 호출당 평균 시간 (초)
    pub mean_seconds: f64,
}

/// 전체 측정 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub direct: Vec<TimingSample>,
    pub fast: Vec<TimingSample>,
}

impl BenchmarkReport {
    pub fn samples(&self, kind: TransformKind) -> &[TimingSample] {
        match kind {
            TransformKind::Direct => &self.direct,
            TransformKind::Fast => &self.fast,
        }
    }

    pub fn mean_seconds(&self, kind: TransformKind, size: usize) -> Option<f64> {
        self.samples(kind)
            .iter()
            .find(|s| s.size == size)
            .map(|s| s.mean_seconds)
    }
}

/// 진행률 알림 단위
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkStep {
    pub kind: TransformKind,
    pub size: usize,
}

/// 직접/빠른 변환을 크기별로 측정
///
/// 같은 구현의 반복 호출은 직렬로 실행한다 (측정 안정성).
#[derive(Debug)]
pub struct BenchmarkHarness {
    config: BenchmarkConfig,
    direct: TransformEngine,
    fast: TransformEngine,
}

impl BenchmarkHarness {
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        let cache = Arc::new(BasisCache::new());
        Ok(Self {
            config,
            direct: TransformEngine::new(TransformKind::Direct, Arc::clone(&cache)),
            fast: TransformEngine::new(TransformKind::Fast, cache),
        })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn run(&self) -> Result<BenchmarkReport> {
        self.run_with_progress(|_| {})
    }

    /// 각 측정이 끝날 때마다 `on_step` 호출
    pub fn run_with_progress(
        &self,
        mut on_step: impl FnMut(BenchmarkStep),
    ) -> Result<BenchmarkReport> {
        let mut report = BenchmarkReport::default();

        for &size in &self.config.naive_sizes {
            let grid = random_grid(size, self.config.seed ^ size as u64);
            let iterations = self.config.naive_iterations(size);
            let mean_seconds = self.time_forward(&self.direct, &grid, iterations)?;
            debug!("direct N={}: {:.6}s ({}회)", size, mean_seconds, iterations);
            report.direct.push(TimingSample {
                size,
                iterations,
                mean_seconds,
            });
            on_step(BenchmarkStep {
                kind: TransformKind::Direct,
                size,
            });
        }

        for &size in &self.config.fast_sizes {
            let grid = random_grid(size, self.config.seed ^ size as u64);
            let iterations = self.config.fast_iterations;
            let mean_seconds = self.time_forward(&self.fast, &grid, iterations)?;
            debug!("fast N={}: {:.6}s ({}회)", size, mean_seconds, iterations);
            report.fast.push(TimingSample {
                size,
                iterations,
                mean_seconds,
            });
            on_step(BenchmarkStep {
                kind: TransformKind::Fast,
                size,
            });
        }

        Ok(report)
    }

    fn time_forward(
        &self,
        engine: &TransformEngine,
        grid: &Array2<f64>,
        iterations: usize,
    ) -> Result<f64> {
        // 워밍업: 기저 행렬 / DCT 계획 생성 비용 제외
        for _ in 0..self.config.warmup_iterations {
            black_box(engine.forward(grid.view())?);
        }

        let start = Instant::now();
        for _ in 0..iterations {
            black_box(engine.forward(black_box(grid.view()))?);
        }
        Ok(start.elapsed().as_secs_f64() / iterations.max(1) as f64)
    }
}
