//! End-to-end scenarios: ingestion, resampling and the indicator suite.

mod common;

use std::thread;

use approx::assert_relative_eq;
use common::*;
use fta_core::io::{read_csv, TimeUnit, MINUTE, SECOND};
use fta_core::{Bar, IndicatorError, OhlcvSeries, Series};
use fta_indicators::prelude::*;

fn random_frame(len: usize, seed: u64) -> OhlcvSeries<f64> {
    generate_ohlcv_from_close(&generate_random_walk(100.0, 1.5, len, seed), 0.02, MINUTE)
}

#[test]
fn sma_uses_shrinking_first_window() {
    let close: Series<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0].into();
    let result = sma(&close, 2).unwrap();
    assert_eq!(result.as_slice(), &[1.0, 1.5, 2.5, 3.5, 4.5]);
}

#[test]
fn psar_reference_bars() {
    let high: Series<f64> = vec![10.0, 12.0, 11.0, 13.0, 9.0].into();
    let low: Series<f64> = vec![8.0, 9.0, 8.0, 10.0, 7.0].into();
    let close: Series<f64> = vec![9.0, 11.0, 9.0, 12.0, 8.0].into();

    let out = psar(&high, &low, &close, 0.02, 0.2).unwrap();

    // bar 2 projects 11 + 0.02 * (10 - 11) = 10.98, then low 8 reverses to the high point
    assert_eq!(out.psar.as_slice(), &[9.0, 11.0, 10.0, 8.0, 13.0]);
    assert_eq!(out.bull.as_slice(), &[0.0, 0.0, 0.0, 8.0, 0.0]);
    assert_eq!(out.bear.as_slice(), &[0.0, 0.0, 10.0, 0.0, 13.0]);
}

#[test]
fn psar_follows_rising_market() {
    let high: Series<f64> = vec![10.0, 11.0, 12.0, 13.0, 14.0].into();
    let low: Series<f64> = vec![9.0, 10.0, 11.0, 12.0, 13.0].into();
    let close: Series<f64> = vec![9.5, 10.5, 11.5, 12.5, 13.5].into();

    let out = psar(&high, &low, &close, 0.02, 0.2).unwrap();

    assert_series_eq(&out.psar, &[9.5, 10.5, 9.0, 9.12, 9.3528], 1e-12, "psar");
    assert_eq!(out.bear.as_slice(), &[0.0; 5]);
}

#[test]
fn rsi_of_constant_prices_is_one_hundred() {
    let close = generate_constant(42.0, 30);
    for adjust in [true, false] {
        let result = rsi(&close, 14, adjust).unwrap();
        assert!(result[0].is_nan());
        assert!(result.iter().skip(1).all(|&v| v == 100.0));
    }
}

#[test]
fn crsi_of_constant_prices() {
    let close = generate_constant(42.0, 30);
    let result = crsi(&close, 3, 2, 100, true).unwrap();

    assert!(result[0].is_nan());
    for &v in result.iter().skip(1) {
        assert_relative_eq!(v, 200.0 / 3.0, epsilon = 1e-12);
    }
}

#[test]
fn moving_averages_track_linear_trend() {
    let close = generate_linear(100.0, 1.0, 60);

    let sma = sma(&close, 10).unwrap();
    let smm = smm(&close, 10).unwrap();
    // a centred window lags a linear trend by half its width
    for i in 9..close.len() {
        assert_relative_eq!(sma[i], close[i] - 4.5, epsilon = 1e-9);
        assert_relative_eq!(smm[i], close[i] - 4.5, epsilon = 1e-9);
    }

    let wma = wma(&close, 10).unwrap();
    let hma = hma(&close, 16).unwrap();
    for i in 30..close.len() {
        assert!(wma[i] > sma[i]);
        // WMA(n) lags a unit trend by (n - 1) / 3 bars
        assert_relative_eq!(hma[i], close[i] - 2.0 / 3.0, epsilon = 1e-9);
    }
}

#[test]
fn macd_matches_component_emas() {
    let close = generate_sine(100.0, 5.0, 20, 120);
    let out = macd(&close, 12.0, 26.0, 9.0, true).unwrap();
    let fast = ema(&close, 12, true).unwrap();
    let slow = ema(&close, 26, true).unwrap();

    let histogram = out.histogram();
    for i in 0..close.len() {
        assert_eq!(out.macd[i], fast[i] - slow[i]);
        assert_eq!(histogram[i], out.macd[i] - out.signal[i]);
    }
}

#[test]
fn kst_components_on_rising_prices() {
    let close: Series<f64> = (0..80).map(|i| 100.0 * 1.01f64.powi(i)).collect();
    let out = kst(&close, 10, 15, 20, 30).unwrap();

    // once every smoothing window clears the longest lookback, all terms are positive
    for i in 50..close.len() {
        assert!(out.k[i] > 0.0);
        assert!(out.signal[i] > 0.0);
    }
    assert!(out.k[5].is_nan());
}

#[test]
fn bands_and_percent_b_are_consistent() {
    let close = generate_sine(50.0, 3.0, 15, 90);
    let ma = sma(&close, 20).unwrap();
    let bands = bbands(&close, &ma, 20, 2.0).unwrap();
    let pb = percent_b(&close, &ma, 20, 2.0).unwrap();

    for i in 20..close.len() {
        let expected = (close[i] - bands.lower[i]) / (bands.upper[i] - bands.lower[i]);
        assert_relative_eq!(pb[i], expected, epsilon = 1e-12);
        assert_relative_eq!(bands.upper[i] - ma[i], ma[i] - bands.lower[i], epsilon = 1e-9);
    }
}

#[test]
fn percent_b_of_flat_prices_is_undefined() {
    let close = generate_constant(10.0, 10);
    let ma = sma(&close, 5).unwrap();
    let pb = percent_b(&close, &ma, 5, 2.0).unwrap();
    assert!(pb.iter().all(|v| v.is_nan()));
}

#[test]
fn volume_flow_on_frame() {
    let ohlcv = random_frame(100, 42);
    let line = adl(ohlcv.high(), ohlcv.low(), ohlcv.close()).unwrap();
    let osc = chaikin(ohlcv.high(), ohlcv.low(), ohlcv.close(), true).unwrap();

    let fast = ema(&line, 3, true).unwrap();
    let slow = ema(&line, 10, true).unwrap();
    for i in 0..ohlcv.len() {
        assert_relative_eq!(osc[i], fast[i] - slow[i], epsilon = 1e-12);
    }
}

#[test]
fn csv_ingest_resample_and_calculate() {
    let minutes = random_frame(120, 7);
    let csv = to_csv(&minutes, SECOND);

    let ohlcv: OhlcvSeries<f64> = read_csv(csv.as_bytes(), MINUTE, TimeUnit::Seconds).unwrap();
    assert_eq!(ohlcv, minutes);

    let five = ohlcv.resample(5 * MINUTE).unwrap();
    assert_eq!(five.len(), 24);
    assert_eq!(five.index().freq(), 5 * MINUTE);
    for k in 0..five.len() {
        let bucket = ohlcv.slice(5 * k, 5 * k + 5);
        assert_eq!(five.open()[k], bucket.open()[0]);
        assert_eq!(five.high()[k], bucket.high().max());
        assert_eq!(five.low()[k], bucket.low().min());
        assert_eq!(five.close()[k], bucket.close()[4]);
        assert_relative_eq!(five.volume()[k], bucket.volume().sum(), epsilon = 1e-9);
    }

    let close = five.close();
    let sma_out = Sma::<f64>::new(SmaConfig::new(5)).calculate(&five).unwrap();
    assert!(sma_out.same_values(&sma(close, 5).unwrap()));

    let rsi_out = Rsi::<f64>::new(RsiConfig::new(14)).calculate(&five).unwrap();
    let expected = rsi(close, 14, true).unwrap();
    assert!(rsi_out[0].is_nan());
    assert!(rsi_out.same_values(&expected));
    assert_series_eq(&rsi_out, expected.as_slice(), 1e-12, "rsi");

    assert_eq!(
        Psar::<f64>::new(PsarConfig::default()).calculate(&five).unwrap(),
        psar(five.high(), five.low(), close, 0.02, 0.2).unwrap()
    );
    let fish_out = Fish::<f64>::new(FishConfig::default()).calculate(&five).unwrap();
    assert!(fish_out.same_values(&fish(five.low(), five.high(), 10, true).unwrap()));

    let crsi = Crsi::<f64>::new(CrsiConfig::default()).calculate(&five).unwrap();
    let vzo = Vzo::<f64>::new(VzoConfig::default()).calculate(&five).unwrap();
    let stochd = StochD::<f64>::new(StochDConfig::default()).calculate(&five).unwrap();
    let stoch_rsi = StochRsi::<f64>::new(StochRsiConfig::default()).calculate(&five).unwrap();
    for series in [&crsi, &vzo, &stochd, &stoch_rsi] {
        assert_eq!(series.len(), five.len());
        assert!(series.index().ptr_eq(five.index()));
    }
}

#[test]
fn resample_gap_produces_empty_bucket() {
    let bars: Vec<Bar<f64>> = vec![
        Bar::new(0, 1.0, 2.0, 0.5, 1.5, 10.0),
        Bar::new(MINUTE, 1.5, 2.5, 1.0, 2.0, 20.0),
        Bar::new(3 * MINUTE, 2.0, 3.0, 1.5, 2.5, 30.0),
    ];
    let ohlcv = OhlcvSeries::from_bars(MINUTE, &bars).unwrap();

    let mut resampled = ohlcv.resample(MINUTE).unwrap();
    assert_eq!(resampled.index().timestamps(), &[0, MINUTE, 2 * MINUTE, 3 * MINUTE]);
    assert!(resampled.close()[2].is_nan());
    assert!(resampled.volume()[2].is_nan());

    resampled.pad();
    assert_eq!(resampled.close().as_slice(), &[1.5, 2.0, 2.0, 2.5]);
}

#[test]
fn indicators_run_concurrently() {
    let frames: Vec<_> = (0..4).map(|seed| random_frame(200, seed)).collect();
    let indicator = Rsi::<f64>::new(RsiConfig::default());

    let results: Vec<Series<f64>> = thread::scope(|scope| {
        let handles: Vec<_> = frames
            .iter()
            .map(|frame| scope.spawn(|| indicator.calculate(frame).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (frame, result) in frames.iter().zip(&results) {
        let expected = rsi(frame.close(), 14, true).unwrap();
        assert!(result[0].is_nan());
        assert!(result.same_values(&expected));
        assert_series_eq(result, expected.as_slice(), 1e-12, "rsi");
    }
}

#[test]
fn invalid_arguments_are_reported() {
    let close = generate_linear(1.0, 1.0, 10);
    let short: Series<f64> = vec![1.0, 2.0].into();

    assert_eq!(sma(&close, 0).unwrap_err(), IndicatorError::InvalidWindow(0));
    assert!(matches!(
        hma(&close, 1).unwrap_err(),
        IndicatorError::InvalidParameter { name: "period", .. }
    ));
    assert!(matches!(
        psar(&close, &close, &close, 0.0, 0.2).unwrap_err(),
        IndicatorError::InvalidParameter { name: "iaf", .. }
    ));
    assert!(matches!(
        stoch(&close, &short, &close, 3).unwrap_err(),
        IndicatorError::LengthMismatch { .. }
    ));
    assert!(matches!(
        close.resample(0, 0).unwrap_err(),
        IndicatorError::InvalidFrequency(0)
    ));
}
