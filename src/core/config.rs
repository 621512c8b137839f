//! # 압축 / 벤치마크 설정

use serde::{Deserialize, Serialize};

use crate::core::error::{CompressError, Result};
use crate::core::mask::clamp_threshold;
use crate::core::transform::TransformKind;

/// 블록 압축 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// 블록 크기 F
    pub block_size: usize,
    /// 대각선 임계값 d (범위 밖이면 [0, 2F−2]로 잘림)
    pub threshold: i64,
    /// 변환 구현
    pub strategy: TransformKind,
    /// 블록 병렬 처리
    pub parallel: bool,
    /// 전용 스레드 풀 크기 (None이면 rayon 전역 풀)
    pub num_threads: Option<usize>,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            block_size: 8,
            threshold: 8,
            strategy: TransformKind::Fast,
            parallel: true,
            num_threads: None,
        }
    }
}

impl CompressionConfig {
    pub fn new(block_size: usize, threshold: i64) -> Self {
        Self {
            block_size,
            threshold,
            ..Self::default()
        }
    }

    /// 직접 행렬 곱, 순차 처리 (검증용 기준 설정)
    pub fn reference(block_size: usize, threshold: i64) -> Self {
        Self {
            block_size,
            threshold,
            strategy: TransformKind::Direct,
            parallel: false,
            num_threads: None,
        }
    }

    /// d를 2F−2로 두는 설정: 가장 높은 모서리 계수 하나만 버린다
    pub fn near_lossless(block_size: usize) -> Self {
        Self::new(block_size, 2 * block_size as i64 - 2)
    }

    pub fn with_strategy(mut self, strategy: TransformKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(CompressError::invalid("블록 크기 F는 1 이상이어야 함"));
        }
        if self.num_threads == Some(0) {
            return Err(CompressError::invalid("스레드 수는 1 이상이어야 함"));
        }
        Ok(())
    }

    /// 자르기 정책을 적용한 실제 임계값
    pub fn effective_threshold(&self) -> usize {
        clamp_threshold(self.block_size, self.threshold)
    }

    /// 실제로 쓰일 작업 스레드 수
    pub fn resolved_threads(&self) -> usize {
        if !self.parallel {
            return 1;
        }
        self.num_threads.unwrap_or_else(num_cpus::get)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CompressError::invalid(format!("설정 JSON 파싱 실패: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CompressError::invalid(format!("설정 직렬화 실패: {}", e)))
    }
}

/// 변환 성능 측정 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// 직접 변환을 잴 크기들 (O(N³)이라 작게 유지)
    pub naive_sizes: Vec<usize>,
    /// 빠른 변환을 잴 크기들
    pub fast_sizes: Vec<usize>,
    /// 직접 변환 반복 예산: 크기 N에서 max(1, budget / N)회
    pub naive_budget: usize,
    /// 빠른 변환 반복 횟수
    pub fast_iterations: usize,
    /// 측정 전 워밍업 호출 수
    pub warmup_iterations: usize,
    /// 입력 행렬 난수 시드
    pub seed: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            naive_sizes: vec![4, 8, 16, 32, 64, 128],
            fast_sizes: vec![4, 8, 16, 32, 64, 128, 256, 512, 1024],
            naive_budget: 100,
            fast_iterations: 100,
            warmup_iterations: 1,
            seed: 0,
        }
    }
}

impl BenchmarkConfig {
    /// 테스트와 빠른 확인용 작은 설정
    pub fn quick() -> Self {
        Self {
            naive_sizes: vec![4, 8, 16],
            fast_sizes: vec![4, 8, 16, 32],
            naive_budget: 16,
            fast_iterations: 4,
            warmup_iterations: 1,
            seed: 0,
        }
    }

    /// 크기 N에서 직접 변환 반복 횟수
    pub fn naive_iterations(&self, size: usize) -> usize {
        (self.naive_budget / size.max(1)).max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.naive_sizes.iter().chain(&self.fast_sizes).any(|&n| n == 0) {
            return Err(CompressError::invalid("벤치마크 크기는 1 이상이어야 함"));
        }
        if self.fast_iterations == 0 {
            return Err(CompressError::invalid("fast_iterations는 1 이상이어야 함"));
        }
        Ok(())
    }

    /// 진행률 표시용 전체 측정 단계 수
    pub fn total_steps(&self) -> usize {
        self.naive_sizes.len() + self.fast_sizes.len()
    }
}
