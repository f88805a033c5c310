//! Benchmark binary for the fta indicators.
//!
//! Usage:
//!     fta_bench <csv_file> <iterations> [resample_seconds]
//!
//! The CSV holds minute bars as `time,open,high,low,close,volume` rows with
//! Unix timestamps in seconds and no header. With `resample_seconds` the
//! frame is first resampled to that frequency.
//!
//! Outputs a JSON array of benchmark results to stdout. Progress goes to
//! stderr; set `RUST_LOG` to control it.

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fta_core::io::{read_csv, TimeUnit, MINUTE, SECOND};
use fta_core::{IndicatorError, OhlcvSeries};
use fta_indicators::prelude::*;

#[derive(Debug, Serialize)]
struct BenchmarkResult {
    name: String,
    implementation: String,
    candles: usize,
    iterations: usize,
    total_time_ms: f64,
    avg_time_ms: f64,
    min_time_ms: f64,
    max_time_ms: f64,
    throughput_candles_per_sec: f64,
}

fn benchmark<F>(name: &str, iterations: usize, candles: usize, mut f: F) -> BenchmarkResult
where
    F: FnMut() -> fta_core::Result<()>,
{
    info!(indicator = name, "benchmark");
    let mut times = Vec::with_capacity(iterations);
    let mut failed = false;

    for _ in 0..iterations {
        let start = Instant::now();
        if let Err(err) = f() {
            failed = true;
            warn!(indicator = name, %err, "calculation failed");
        }
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        times.push(elapsed);
        if failed {
            break;
        }
    }

    let total_time: f64 = times.iter().sum();
    let avg_time = total_time / times.len().max(1) as f64;
    let min_time = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max_time = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let throughput = if avg_time > 0.0 {
        (candles as f64 / avg_time) * 1000.0
    } else {
        0.0
    };

    BenchmarkResult {
        name: name.to_string(),
        implementation: "fta".to_string(),
        candles,
        iterations: times.len(),
        total_time_ms: total_time,
        avg_time_ms: avg_time,
        min_time_ms: min_time,
        max_time_ms: max_time,
        throughput_candles_per_sec: throughput,
    }
}

fn bench_indicator<I>(
    name: &str,
    config: I::Config,
    iterations: usize,
    ohlcv: &OhlcvSeries<f64>,
) -> BenchmarkResult
where
    I: Indicator<f64>,
{
    let indicator = I::new(config);
    benchmark(name, iterations, ohlcv.len(), || {
        indicator.calculate(ohlcv).map(drop)
    })
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let data_file = &args[1];
    let iterations: usize = args[2].parse()?;
    let resample = args.get(3).map(|s| s.parse::<i64>()).transpose()?;

    info!(path = %data_file, "loading data");
    let reader = BufReader::new(File::open(data_file)?);
    let mut ohlcv: OhlcvSeries<f64> = read_csv(reader, MINUTE, TimeUnit::Seconds)?;
    if let Some(seconds) = resample {
        let freq = seconds
            .checked_mul(SECOND)
            .ok_or(IndicatorError::InvalidFrequency(seconds))?;
        ohlcv = ohlcv.resample(freq)?;
        ohlcv.pad();
    }
    let candles = ohlcv.len();
    info!(candles, "loaded");

    let results = vec![
        // Trend
        bench_indicator::<Sma<f64>>("SMA(41)", SmaConfig::default(), iterations, &ohlcv),
        bench_indicator::<Smm<f64>>("SMM(9)", SmmConfig::default(), iterations, &ohlcv),
        bench_indicator::<Ema<f64>>("EMA(9)", EmaConfig::default(), iterations, &ohlcv),
        bench_indicator::<Ssma<f64>>("SSMA(9)", SsmaConfig::default(), iterations, &ohlcv),
        bench_indicator::<Wma<f64>>("WMA(9)", WmaConfig::default(), iterations, &ohlcv),
        bench_indicator::<Hma<f64>>("HMA(16)", HmaConfig::default(), iterations, &ohlcv),
        bench_indicator::<Psar<f64>>("PSAR", PsarConfig::default(), iterations, &ohlcv),
        // Momentum
        bench_indicator::<Roc<f64>>("ROC(12)", RocConfig::default(), iterations, &ohlcv),
        bench_indicator::<Kst<f64>>("KST", KstConfig::default(), iterations, &ohlcv),
        bench_indicator::<Fish<f64>>("FISH(10)", FishConfig::default(), iterations, &ohlcv),
        bench_indicator::<Macd<f64>>("MACD", MacdConfig::default(), iterations, &ohlcv),
        bench_indicator::<Rsi<f64>>("RSI(14)", RsiConfig::default(), iterations, &ohlcv),
        bench_indicator::<Crsi<f64>>("CRSI", CrsiConfig::default(), iterations, &ohlcv),
        bench_indicator::<Vzo<f64>>("VZO(14)", VzoConfig::default(), iterations, &ohlcv),
        bench_indicator::<Stoch<f64>>("STOCH(14)", StochConfig::default(), iterations, &ohlcv),
        bench_indicator::<StochD<f64>>("STOCHD", StochDConfig::default(), iterations, &ohlcv),
        bench_indicator::<StochRsi<f64>>("STOCHRSI", StochRsiConfig::default(), iterations, &ohlcv),
        // Volatility
        bench_indicator::<BollingerBands<f64>>("BBANDS", BollingerConfig::default(), iterations, &ohlcv),
        bench_indicator::<PercentB<f64>>("PERCENT_B", BollingerConfig::default(), iterations, &ohlcv),
        // Volume
        bench_indicator::<Adl<f64>>("ADL", AdlConfig, iterations, &ohlcv),
        bench_indicator::<Chaikin<f64>>("CHAIKIN", ChaikinConfig::default(), iterations, &ohlcv),
    ];

    println!("{}", serde_json::to_string(&results)?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <csv_file> <iterations> [resample_seconds]", args[0]);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
