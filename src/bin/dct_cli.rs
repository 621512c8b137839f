use std::fs;
use std::process;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use dct_compress::core::benchmark::BenchmarkStep;
use dct_compress::core::mask::clamp_threshold;
use dct_compress::core::quality::{
    run_experiments_with_progress, threshold_sweep, ExperimentPlan, ExperimentSummary,
    DEFAULT_SWEEP,
};
use dct_compress::core::synthetic::{random_grid, reference_block, SyntheticPattern};
use dct_compress::core::transform::{max_abs_diff, transform_1d, verify_equivalence, verify_round_trip};
use dct_compress::{
    BasisCache, BenchmarkConfig, BenchmarkHarness, BlockCompressor, BlockTransform,
    ComplexityAnalysis, CompressionConfig, FrequencyMask, GrayImage, QualityAnalyzer,
    TransformEngine, TransformKind,
};

fn main() {
    env_logger::init();

    let matches = Command::new("DCT CLI")
        .version(env!("CARGO_PKG_VERSION"))
        .about("블록 DCT 이미지 압축 도구")
        .subcommand(
            Command::new("compress")
                .about("이미지 압축 후 품질 보고")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .value_name("FILE")
                        .help("8비트 raw 그레이스케일 파일 (없으면 합성 이미지)")
                )
                .arg(
                    Arg::new("pattern")
                        .long("pattern")
                        .value_name("PATTERN")
                        .help("합성 패턴 (gradient | checker | noise | perlin)")
                        .default_value("perlin")
                )
                .arg(
                    Arg::new("height")
                        .long("height")
                        .value_name("H")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("256")
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .value_name("W")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("256")
                )
                .arg(seed_arg())
                .args(compression_args())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("FILE")
                        .help("재구성 이미지를 raw로 저장")
                )
                .arg(json_arg())
        )
        .subcommand(
            Command::new("mask")
                .about("주파수 마스크 출력")
                .arg(
                    Arg::new("block-size")
                        .long("block-size")
                        .short('f')
                        .value_name("F")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("8")
                )
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .short('d')
                        .value_name("D")
                        .allow_hyphen_values(true)
                        .value_parser(clap::value_parser!(i64))
                        .default_value("8")
                )
        )
        .subcommand(
            Command::new("experiment")
                .about("합성 이미지들에 대한 F × d 실험 격자")
                .arg(
                    Arg::new("size")
                        .long("size")
                        .value_name("N")
                        .help("합성 이미지 한 변 크기")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("128")
                )
                .arg(seed_arg())
                .arg(
                    Arg::new("strategy")
                        .long("strategy")
                        .value_name("KIND")
                        .help("변환 구현 (direct | fast)")
                        .default_value("fast")
                )
                .arg(
                    Arg::new("sweep")
                        .long("sweep")
                        .value_name("F")
                        .help("이 F에서 기본 임계값들을 추가로 훑어봄")
                        .value_parser(clap::value_parser!(usize))
                )
                .arg(json_arg())
        )
        .subcommand(
            Command::new("benchmark")
                .about("직접 / 빠른 변환 실행 시간 비교")
                .arg(
                    Arg::new("quick")
                        .long("quick")
                        .help("작은 크기만 측정")
                        .action(ArgAction::SetTrue)
                )
                .arg(config_arg())
                .arg(
                    Arg::new("save-results")
                        .long("save")
                        .short('s')
                        .value_name("FILE")
                        .help("결과를 JSON 파일로 저장")
                )
                .arg(json_arg())
        )
        .subcommand(
            Command::new("verify")
                .about("두 변환 구현의 수치 동등성 검증")
                .arg(
                    Arg::new("sizes")
                        .long("sizes")
                        .value_name("LIST")
                        .help("쉼표로 구분한 크기들")
                        .value_delimiter(',')
                        .value_parser(clap::value_parser!(usize))
                        .default_value("4,8,16,32")
                )
                .arg(
                    Arg::new("tolerance")
                        .long("tolerance")
                        .value_name("EPS")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("1e-9")
                )
                .arg(seed_arg())
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("compress", sub_matches)) => handle_compress(sub_matches),
        Some(("mask", sub_matches)) => handle_mask(sub_matches),
        Some(("experiment", sub_matches)) => handle_experiment(sub_matches),
        Some(("benchmark", sub_matches)) => handle_benchmark(sub_matches),
        Some(("verify", sub_matches)) => handle_verify(sub_matches),
        _ => {
            println!("❌ 명령을 지정해주세요. --help를 참조하세요.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("❌ 오류: {:#}", e);
        process::exit(1);
    }
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .value_name("SEED")
        .value_parser(clap::value_parser!(u64))
        .default_value("42")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("결과를 JSON으로 출력")
        .action(ArgAction::SetTrue)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .value_name("FILE")
        .help("JSON 설정 파일")
}

/// 설정 파일 값을 명시한 플래그가 덮어쓴다
fn compression_args() -> Vec<Arg> {
    vec![
        config_arg(),
        Arg::new("block-size")
            .long("block-size")
            .short('f')
            .value_name("F")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("threshold")
            .long("threshold")
            .short('d')
            .value_name("D")
            .allow_hyphen_values(true)
            .value_parser(clap::value_parser!(i64)),
        Arg::new("strategy")
            .long("strategy")
            .value_name("KIND")
            .help("변환 구현 (direct | fast)"),
        Arg::new("threads")
            .long("threads")
            .value_name("N")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("sequential")
            .long("sequential")
            .help("블록을 순차 처리")
            .action(ArgAction::SetTrue),
    ]
}

fn new_progress_bar(len: u64, icon: &str, hidden: bool) -> Result<ProgressBar> {
    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos:>3}}/{{len:3}} {{msg}}",
                icon
            ))?
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    if hidden {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    }
    Ok(progress)
}

fn load_compression_config(matches: &ArgMatches) -> Result<CompressionConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("설정 파일을 읽을 수 없음: {}", path))?;
            CompressionConfig::from_json_str(&content)?
        }
        None => CompressionConfig::default(),
    };

    if let Some(&block_size) = matches.get_one::<usize>("block-size") {
        config.block_size = block_size;
    }
    if let Some(&threshold) = matches.get_one::<i64>("threshold") {
        config.threshold = threshold;
    }
    if let Some(strategy) = matches.get_one::<String>("strategy") {
        config.strategy = strategy.parse()?;
    }
    if let Some(&threads) = matches.get_one::<usize>("threads") {
        config.num_threads = Some(threads);
    }
    if matches.get_flag("sequential") {
        config.parallel = false;
    }

    config.validate()?;
    Ok(config)
}

fn load_image(matches: &ArgMatches) -> Result<(String, GrayImage)> {
    let height = *matches.get_one::<usize>("height").context("height 누락")?;
    let width = *matches.get_one::<usize>("width").context("width 누락")?;

    if let Some(path) = matches.get_one::<String>("input") {
        let data = fs::read(path).with_context(|| format!("입력 파일을 읽을 수 없음: {}", path))?;
        let image = GrayImage::from_vec(height, width, data)
            .with_context(|| format!("{}를 {}x{} raw 이미지로 해석할 수 없음", path, height, width))?;
        return Ok((path.clone(), image));
    }

    let pattern: SyntheticPattern = matches
        .get_one::<String>("pattern")
        .context("pattern 누락")?
        .parse()?;
    let seed = *matches.get_one::<u64>("seed").context("seed 누락")?;
    Ok((pattern.to_string(), pattern.generate(height, width, seed)?))
}

fn handle_compress(matches: &ArgMatches) -> Result<()> {
    let config = load_compression_config(matches)?;
    let (name, image) = load_image(matches)?;
    let json = matches.get_flag("json");

    if !json {
        println!("🗜️ 압축 시작:");
        println!("   입력: {} ({}x{})", name, image.height(), image.width());
        println!("   F = {}, d = {}", config.block_size, config.threshold);
        println!("   변환: {}, 스레드: {}", config.strategy, config.resolved_threads());
    }

    let compressor = BlockCompressor::new(config.clone())?;
    let compressed = compressor.compress(&image)?;
    let report = QualityAnalyzer::report(&image, &compressed, config.block_size, config.threshold)?;

    if let Some(path) = matches.get_one::<String>("output") {
        fs::write(path, compressed.into_vec())
            .with_context(|| format!("출력 파일을 쓸 수 없음: {}", path))?;
        if !json {
            println!("💾 저장: {} ({}x{})", path, report.output_dims.0, report.output_dims.1);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        report.print_report();
    }
    Ok(())
}

fn handle_mask(matches: &ArgMatches) -> Result<()> {
    let block_size = *matches.get_one::<usize>("block-size").context("block-size 누락")?;
    let requested = *matches.get_one::<i64>("threshold").context("threshold 누락")?;
    if block_size == 0 {
        bail!("블록 크기 F는 1 이상이어야 함");
    }

    let mask = FrequencyMask::new(block_size, clamp_threshold(block_size, requested))?;
    println!("F = {}, d = {} (요청 {})", block_size, mask.threshold(), requested);
    print!("{}", mask.render());
    println!(
        "남은 계수: {}/{} ({:.2}% 버림)",
        mask.kept_count(),
        mask.total_count(),
        mask.discarded_count() as f64 / mask.total_count() as f64 * 100.0
    );
    Ok(())
}

fn handle_experiment(matches: &ArgMatches) -> Result<()> {
    let size = *matches.get_one::<usize>("size").context("size 누락")?;
    let seed = *matches.get_one::<u64>("seed").context("seed 누락")?;
    let strategy: TransformKind = matches
        .get_one::<String>("strategy")
        .context("strategy 누락")?
        .parse()?;
    let json = matches.get_flag("json");

    let images = SyntheticPattern::ALL
        .iter()
        .map(|pattern| Ok((pattern.to_string(), pattern.generate(size, size, seed)?)))
        .collect::<Result<Vec<_>>>()?;

    let compressor = BlockCompressor::new(CompressionConfig::default().with_strategy(strategy))?;
    let plan = ExperimentPlan::default();
    let progress = new_progress_bar(plan.run_count(&images) as u64, "🧪", json)?;
    let records = run_experiments_with_progress(&images, &plan, &compressor, |record| {
        progress.set_message(format!(
            "{} F={} d={}",
            record.image, record.report.block_size, record.report.threshold
        ));
        progress.inc(1);
    })?;
    progress.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("{:<10} {:>4} {:>4} {:>10} {:>10} {:>10}", "image", "F", "d", "MSE", "PSNR", "ratio");
        println!("{}", "─".repeat(54));
        for record in &records {
            let r = &record.report;
            println!(
                "{:<10} {:>4} {:>4} {:>10.3} {:>10.2} {:>9.2}%",
                record.image,
                r.block_size,
                r.threshold,
                r.mse,
                r.psnr_db(),
                r.compression_ratio
            );
        }
        if let Some(summary) = ExperimentSummary::from_records(&records) {
            println!(
                "\n📊 {}건: 평균 PSNR {:.2} dB (최고 {:.2}, 최저 {:.2})",
                summary.count, summary.mean_psnr_db, summary.best_psnr_db, summary.worst_psnr_db
            );
        }
    }

    if let Some(&block_size) = matches.get_one::<usize>("sweep") {
        for (name, image) in &images {
            let reports = threshold_sweep(image, block_size, &DEFAULT_SWEEP, &compressor)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
                continue;
            }
            println!("\n🔍 {} (F = {}) 임계값 훑기", name, block_size);
            for r in &reports {
                println!("  d = {:>3}: PSNR {:>10}, 압축률 {:>6.2}%", r.threshold, r.psnr.to_string(), r.compression_ratio);
            }
        }
    }
    Ok(())
}

fn handle_benchmark(matches: &ArgMatches) -> Result<()> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("설정 파일을 읽을 수 없음: {}", path))?;
            serde_json::from_str::<BenchmarkConfig>(&content)?
        }
        None if matches.get_flag("quick") => BenchmarkConfig::quick(),
        None => BenchmarkConfig::default(),
    };
    let json = matches.get_flag("json");

    let harness = BenchmarkHarness::new(config.clone())?;
    let progress = new_progress_bar(config.total_steps() as u64, "⏱️", json)?;

    let report = harness.run_with_progress(|step: BenchmarkStep| {
        progress.set_message(format!("{} N={}", step.kind, step.size));
        progress.inc(1);
    })?;
    progress.finish_with_message("완료");

    let analysis = ComplexityAnalysis::from_report(&report);

    if let Some(path) = matches.get_one::<String>("save-results") {
        let payload = serde_json::json!({ "report": report, "analysis": analysis });
        fs::write(path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("결과 파일을 쓸 수 없음: {}", path))?;
    }

    if json {
        let payload = serde_json::json!({ "report": report, "analysis": analysis });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("\n=== 실행 시간 ===");
    for kind in TransformKind::ALL {
        println!("{}:", kind);
        for sample in report.samples(kind) {
            println!(
                "  N={:>5}: {:>12.3} µs ({}회)",
                sample.size,
                sample.mean_seconds * 1e6,
                sample.iterations
            );
        }
    }
    println!();
    analysis.print_report();
    Ok(())
}

/// 기준 블록 합 8950 / 8
const REFERENCE_DC: f64 = 1118.75;

fn handle_verify(matches: &ArgMatches) -> Result<()> {
    let sizes: Vec<usize> = matches
        .get_many::<usize>("sizes")
        .context("sizes 누락")?
        .copied()
        .collect();
    let tolerance = *matches.get_one::<f64>("tolerance").context("tolerance 누락")?;
    let seed = *matches.get_one::<u64>("seed").context("seed 누락")?;

    let cache = Arc::new(BasisCache::new());
    let direct = TransformEngine::new(TransformKind::Direct, Arc::clone(&cache));
    let fast = TransformEngine::new(TransformKind::Fast, cache);

    let mut failed = 0;

    println!("🔬 8×8 기준 블록 검사");
    let block = reference_block();
    let direct_coeffs = direct.forward(block.view())?;
    let fast_coeffs = fast.forward(block.view())?;
    let dc_error = (fast_coeffs[[0, 0]] - REFERENCE_DC).abs();
    let strategy_diff = max_abs_diff(direct_coeffs.view(), fast_coeffs.view())?;
    let first_row: Vec<f64> = block.row(0).to_vec();
    // 1D DC = 행 합 / √8
    let row_dc = transform_1d(TransformKind::Fast, &first_row)?[0];
    let row_dc_error = (row_dc - first_row.iter().sum::<f64>() / 8f64.sqrt()).abs();
    if dc_error <= tolerance && strategy_diff <= tolerance && row_dc_error <= tolerance {
        println!(
            "  ✅ DC = {:.4}, 구현 간 최대 차이 {:.3e}",
            fast_coeffs[[0, 0]],
            strategy_diff
        );
    } else {
        failed += 1;
        println!(
            "  ❌ DC 오차 {:.3e}, 구현 간 차이 {:.3e}, 1D DC 오차 {:.3e}",
            dc_error, strategy_diff, row_dc_error
        );
    }

    println!("🔬 변환 동등성 검증 (허용 오차 {:e})", tolerance);
    for &size in &sizes {
        let grid = random_grid(size, seed ^ size as u64);
        let equivalence = verify_equivalence(&direct, &fast, grid.view(), tolerance);
        let round_trip = verify_round_trip(&fast, grid.view(), tolerance);
        match (equivalence, round_trip) {
            (Ok(eq), Ok(rt)) => {
                println!("  ✅ N={:>4}: 최대 차이 {:.3e}, 왕복 오차 {:.3e}", size, eq, rt);
            }
            (eq, rt) => {
                failed += 1;
                for err in [eq.err(), rt.err()].into_iter().flatten() {
                    println!("  ❌ N={:>4}: {}", size, err);
                }
            }
        }
    }

    if failed > 0 {
        bail!("{}개 크기에서 검증 실패", failed);
    }
    println!("✅ 모든 크기 통과");
    Ok(())
}
