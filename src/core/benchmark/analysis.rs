//! 측정값의 점근 복잡도 분석

use serde::{Deserialize, Serialize};

use super::harness::{BenchmarkReport, TimingSample};

/// 연속한 두 크기 사이의 시간 증가율
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingStep {
    pub from_size: usize,
    pub to_size: usize,
    pub observed_ratio: f64,
    pub expected_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speedup {
    pub size: usize,
    /// direct / fast
    pub factor: f64,
}

/// 직접 변환 N³, 빠른 변환 N²·log₂N 모델과 비교
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAnalysis {
    pub direct_steps: Vec<ScalingStep>,
    pub fast_steps: Vec<ScalingStep>,
    pub speedups: Vec<Speedup>,
    /// log-log 기울기 (직접 변환은 3 근처)
    pub direct_exponent: Option<f64>,
    /// log-log 기울기 (빠른 변환은 2 조금 위)
    pub fast_exponent: Option<f64>,
}

/// N³ 모델의 크기 a → b 증가율
pub fn cubic_ratio(from: usize, to: usize) -> f64 {
    (to as f64 / from as f64).powi(3)
}

/// N²·log₂N 모델의 증가율 (N < 2이면 정의되지 않음)
pub fn n2_log_n_ratio(from: usize, to: usize) -> Option<f64> {
    if from < 2 || to < 2 {
        return None;
    }
    let cost = |n: usize| {
        let n = n as f64;
        n * n * n.log2()
    };
    Some(cost(to) / cost(from))
}

fn scaling_steps(
    samples: &[TimingSample],
    expected: impl Fn(usize, usize) -> Option<f64>,
) -> Vec<ScalingStep> {
    samples
        .windows(2)
        .filter_map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            if a.mean_seconds <= 0.0 {
                return None;
            }
            Some(ScalingStep {
                from_size: a.size,
                to_size: b.size,
                observed_ratio: b.mean_seconds / a.mean_seconds,
                expected_ratio: expected(a.size, b.size)?,
            })
        })
        .collect()
}

/// 최소제곱 log-log 기울기
pub fn loglog_slope(samples: &[TimingSample]) -> Option<f64> {
    let points: Vec<(f64, f64)> = samples
        .iter()
        .filter(|s| s.size > 0 && s.mean_seconds > 0.0)
        .map(|s| ((s.size as f64).ln(), s.mean_seconds.ln()))
        .collect();
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    let sxy: f64 = points.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();
    if sxx == 0.0 {
        return None;
    }
    Some(sxy / sxx)
}

impl ComplexityAnalysis {
    pub fn from_report(report: &BenchmarkReport) -> Self {
        let speedups = report
            .direct
            .iter()
            .filter_map(|d| {
                let fast = report.fast.iter().find(|f| f.size == d.size)?;
                if fast.mean_seconds <= 0.0 {
                    return None;
                }
                Some(Speedup {
                    size: d.size,
                    factor: d.mean_seconds / fast.mean_seconds,
                })
            })
            .collect();

        Self {
            direct_steps: scaling_steps(&report.direct, |a, b| Some(cubic_ratio(a, b))),
            fast_steps: scaling_steps(&report.fast, n2_log_n_ratio),
            speedups,
            direct_exponent: loglog_slope(&report.direct),
            fast_exponent: loglog_slope(&report.fast),
        }
    }

    pub fn print_report(&self) {
        println!("=== 복잡도 분석 ===");
        println!("직접 변환 O(N³): 크기 2배 → 시간 약 8배");
        for step in &self.direct_steps {
            println!(
                "  N {:>4} → {:>4}: ×{:.2} (기대 ×{:.1})",
                step.from_size, step.to_size, step.observed_ratio, step.expected_ratio
            );
        }
        println!("빠른 변환 O(N²logN): 크기 2배 → 시간 약 4~5배");
        for step in &self.fast_steps {
            println!(
                "  N {:>4} → {:>4}: ×{:.2} (기대 ×{:.2})",
                step.from_size, step.to_size, step.observed_ratio, step.expected_ratio
            );
        }
        if let Some(exp) = self.direct_exponent {
            println!("직접 변환 log-log 기울기: {:.2}", exp);
        }
        if let Some(exp) = self.fast_exponent {
            println!("빠른 변환 log-log 기울기: {:.2}", exp);
        }
        println!("속도 향상 (direct / fast):");
        for s in &self.speedups {
            println!("  N={:>4}: {:>8.1}×", s.size, s.factor);
        }
    }
}
