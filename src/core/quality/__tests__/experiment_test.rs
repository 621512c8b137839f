use super::super::{
    run_experiments, run_experiments_with_progress, threshold_sweep, ExperimentPlan,
    ExperimentSummary, DEFAULT_SWEEP,
};
use crate::core::compressor::BlockCompressor;
use crate::core::config::CompressionConfig;
use crate::core::synthetic;

#[test]
fn 실험계획_임계값_테스트() {
    let plan = ExperimentPlan::default();

    // F=4: d_max=6 → 1(1.5), 3, 4(4.5), 6
    let d4: Vec<usize> = plan.thresholds(4).into_iter().map(|(_, d)| d).collect();
    assert_eq!(d4, vec![1, 3, 4, 6]);

    // F=8: d_max=14 → 3, 7, 10, 14
    let d8: Vec<usize> = plan.thresholds(8).into_iter().map(|(_, d)| d).collect();
    assert_eq!(d8, vec![3, 7, 10, 14]);

    // 0은 1로 올림
    let tiny = ExperimentPlan {
        block_sizes: vec![2],
        threshold_fractions: vec![0.25],
    };
    assert_eq!(tiny.thresholds(2), vec![(0.25, 1)]);
}

#[test]
fn 실험계획_검증_테스트() {
    assert!(ExperimentPlan::default().validate().is_ok());
    let bad = ExperimentPlan {
        block_sizes: vec![8],
        threshold_fractions: vec![1.5],
    };
    assert!(bad.validate().is_err());
}

#[test]
fn 실험격자_실행_테스트() {
    let images = vec![
        ("gradient".to_string(), synthetic::gradient(40, 40).unwrap()),
        ("perlin".to_string(), synthetic::perlin(64, 48, 3, 20.0).unwrap()),
        // F=16보다 작음 → F=16 조합은 건너뜀
        ("small".to_string(), synthetic::uniform_noise(12, 12, 1).unwrap()),
    ];
    let compressor = BlockCompressor::new(CompressionConfig::default()).unwrap();
    let plan = ExperimentPlan::default();

    let mut seen = 0;
    let records =
        run_experiments_with_progress(&images, &plan, &compressor, |_| seen += 1).unwrap();
    // (2 이미지 × 3 F + 1 이미지 × 2 F) × 4 비율
    assert_eq!(records.len(), (2 * 3 + 2) * 4);
    assert_eq!(seen, records.len());
    assert_eq!(plan.run_count(&images), records.len());
    assert_eq!(run_experiments(&images, &plan, &compressor).unwrap(), records);
    assert!(records.iter().all(|r| r.report.compression_ratio >= 0.0));
    assert!(records
        .iter()
        .filter(|r| r.image == "small")
        .all(|r| r.report.block_size != 16));

    let summary = ExperimentSummary::from_records(&records).unwrap();
    assert_eq!(summary.count, records.len());
    assert!(summary.best_psnr_db >= summary.mean_psnr_db);
    assert!(summary.mean_psnr_db >= summary.worst_psnr_db);

    let json = serde_json::to_string(&records[0]).unwrap();
    assert!(json.contains("\"gradient\""));

    assert!(ExperimentSummary::from_records(&[]).is_none());
}

#[test]
fn 임계값_훑기_테스트() {
    let image = synthetic::perlin(64, 64, 8, 24.0).unwrap();
    let compressor = BlockCompressor::new(CompressionConfig::default()).unwrap();

    let reports = threshold_sweep(&image, 8, &DEFAULT_SWEEP, &compressor).unwrap();
    assert_eq!(reports.len(), DEFAULT_SWEEP.len());

    // 압축률은 d가 커질수록 줄어든다
    for pair in reports.windows(2) {
        assert!(pair[0].compression_ratio >= pair[1].compression_ratio);
    }
    assert_eq!(reports.last().unwrap().kept, 63);
}
