//! Property-based tests for fta-indicators.
//!
//! These tests verify invariants that must hold for all inputs.

use fta_core::{Bar, OhlcvSeries, Series, ORIGIN_EPOCH};
use proptest::prelude::*;

use fta_indicators::prelude::*;

// ============================================================================
// Proptest Strategies
// ============================================================================

/// Generate a valid close price (positive, finite).
fn valid_price() -> impl Strategy<Value = f64> {
    (0.01f64..10000.0).prop_filter("must be finite", |x| x.is_finite())
}

/// Generate a valid volume (non-negative, finite).
fn valid_volume() -> impl Strategy<Value = f64> {
    (0.0f64..1_000_000.0).prop_filter("must be finite", |x| x.is_finite())
}

/// Generate bar prices `(high, low, close)` around a random close.
fn valid_hlc() -> impl Strategy<Value = (f64, f64, f64)> {
    (valid_price(), 0.0f64..0.2, 0.0f64..=1.0).prop_map(|(mid, spread, position)| {
        let low = mid * (1.0 - spread / 2.0);
        let high = mid * (1.0 + spread / 2.0);
        let close = low + (high - low) * position;
        (high, low, close)
    })
}

/// Generate a minute-bar frame.
fn valid_ohlcv_series(min_len: usize, max_len: usize) -> impl Strategy<Value = OhlcvSeries<f64>> {
    prop::collection::vec((valid_hlc(), valid_volume()), min_len..=max_len).prop_map(|rows| {
        let bars: Vec<Bar<f64>> = rows
            .into_iter()
            .enumerate()
            .map(|(i, ((high, low, close), volume))| {
                Bar::new(i as i64 * 60, close, high, low, close, volume)
            })
            .collect();
        OhlcvSeries::from_bars(60, &bars).unwrap()
    })
}

/// Generate a price series.
fn price_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Series<f64>> {
    prop::collection::vec(valid_price(), min_len..=max_len).prop_map(Series::from_vec)
}

/// Generate a constant price series.
fn constant_price_series(len: usize) -> impl Strategy<Value = Series<f64>> {
    valid_price().prop_map(move |price| Series::from_vec(vec![price; len]))
}

// ============================================================================
// Moving-Average Property Tests
// ============================================================================

proptest! {
    /// A window of one bar is the identity.
    #[test]
    fn sma_window_one_is_identity(series in price_series(1, 50)) {
        let result = sma(&series, 1).unwrap();
        prop_assert_eq!(result.as_slice(), series.as_slice());
    }

    /// SMA of constant series should equal the constant.
    #[test]
    fn sma_constant_equals_input(
        series in constant_price_series(20),
        period in 1usize..=25,
    ) {
        let price = series[0];
        for (i, &val) in sma(&series, period).unwrap().iter().enumerate() {
            prop_assert!((val - price).abs() < 1e-9 * price.max(1.0),
                "SMA of constant should equal constant at index {}: {} vs {}", i, val, price);
        }
    }

    /// Moving averages stay within the range of their window.
    #[test]
    fn sma_within_window_range(
        series in price_series(2, 60),
        period in 1usize..=15,
    ) {
        let result = sma(&series, period).unwrap();
        let lows = series.rolling(period).min();
        let highs = series.rolling(period).max();

        for i in 0..series.len() {
            prop_assert!(result[i] >= lows[i] - 1e-9 * highs[i]);
            prop_assert!(result[i] <= highs[i] + 1e-9 * highs[i]);
        }
    }

    /// EMA and SSMA of a constant series equal the constant.
    #[test]
    fn ema_ssma_constant_equals_input(
        series in constant_price_series(30),
        period in 1usize..=20,
        adjust in any::<bool>(),
    ) {
        let price = series[0];
        let ema = ema(&series, period, adjust).unwrap();
        let ssma = ssma(&series, period, adjust).unwrap();

        for i in 0..series.len() {
            prop_assert!((ema[i] - price).abs() <= 1e-9 * price);
            prop_assert!((ssma[i] - price).abs() <= 1e-9 * price);
        }
    }

    /// Outputs keep the input index.
    #[test]
    fn outputs_share_input_index(ohlcv in valid_ohlcv_series(1, 40)) {
        let close = ohlcv.close();
        prop_assert!(sma(close, 5).unwrap().index().ptr_eq(ohlcv.index()));
        prop_assert!(wma(close, 5).unwrap().index().ptr_eq(ohlcv.index()));
        prop_assert!(rsi(close, 5, true).unwrap().index().ptr_eq(ohlcv.index()));
    }
}

// ============================================================================
// Oscillator Property Tests
// ============================================================================

proptest! {
    /// MACD is exactly the difference of the fast and slow EMAs.
    #[test]
    fn macd_is_ema_difference(
        series in price_series(1, 80),
        fast in 2usize..=12,
        extra in 1usize..=20,
        adjust in any::<bool>(),
    ) {
        let slow = fast + extra;
        let out = macd(&series, fast as f64, slow as f64, 9.0, adjust).unwrap();
        let fast_ema = ema(&series, fast, adjust).unwrap();
        let slow_ema = ema(&series, slow, adjust).unwrap();

        for i in 0..series.len() {
            prop_assert_eq!(out.macd[i], fast_ema[i] - slow_ema[i]);
        }
    }

    /// RSI is bounded in [0, 100].
    #[test]
    fn rsi_bounded(
        series in price_series(2, 80),
        period in 1usize..=20,
        adjust in any::<bool>(),
    ) {
        let result = rsi(&series, period, adjust).unwrap();
        prop_assert!(result[0].is_nan());
        for &v in &result.as_slice()[1..] {
            prop_assert!((0.0..=100.0 + 1e-9).contains(&v), "RSI {} out of range", v);
        }
    }

    /// Stochastic %K is a fraction of the high-low range.
    #[test]
    fn stoch_bounded(ohlcv in valid_ohlcv_series(1, 60), period in 1usize..=14) {
        let k = stoch(ohlcv.high(), ohlcv.low(), ohlcv.close(), period).unwrap();
        for &v in &k {
            prop_assert!(v.is_nan() || (-1e-9..=1.0 + 1e-9).contains(&v));
        }
    }

    /// VZO is bounded in [-100, 100].
    #[test]
    fn vzo_bounded(ohlcv in valid_ohlcv_series(1, 60), period in 1usize..=20) {
        let result = vzo(ohlcv.close(), ohlcv.volume(), period, true).unwrap();
        for &v in &result {
            prop_assert!(v.is_nan() || (-100.0 - 1e-9..=100.0 + 1e-9).contains(&v));
        }
    }

    /// The streak changes by one per bar in its direction or restarts.
    #[test]
    fn streak_steps(series in price_series(1, 60)) {
        let s = streak(&series);
        prop_assert_eq!(s[0], 0.0);
        for i in 1..series.len() {
            let expected = if series[i] > series[i - 1] {
                s[i - 1].max(0.0) + 1.0
            } else if series[i] < series[i - 1] {
                s[i - 1].min(0.0) - 1.0
            } else {
                0.0
            };
            prop_assert_eq!(s[i], expected);
        }
    }
}

// ============================================================================
// Bands and Volume Property Tests
// ============================================================================

proptest! {
    /// Bands enclose the moving average for a non-negative multiplier.
    #[test]
    fn bbands_enclose_ma(
        series in price_series(1, 60),
        period in 1usize..=20,
        multiplier in 0.0f64..4.0,
    ) {
        let ma = sma(&series, period).unwrap();
        let bands = bbands(&series, &ma, period, multiplier).unwrap();

        for i in 0..series.len() {
            prop_assert!(bands.upper[i] >= ma[i]);
            prop_assert!(ma[i] >= bands.lower[i]);
        }
    }

    /// Each bar moves the ADL by at most one.
    #[test]
    fn adl_steps_bounded(ohlcv in valid_ohlcv_series(2, 60)) {
        let line = adl(ohlcv.high(), ohlcv.low(), ohlcv.close()).unwrap();
        let mut last = 0.0;
        for &v in &line {
            if !v.is_nan() {
                prop_assert!((v - last).abs() <= 1.0 + 1e-9);
                last = v;
            }
        }
    }
}

// ============================================================================
// PSAR Property Tests
// ============================================================================

proptest! {
    /// Exactly one of bull and bear is set on every bar after the seed bars.
    #[test]
    fn psar_outputs_disjoint(ohlcv in valid_ohlcv_series(2, 80)) {
        let out = psar(ohlcv.high(), ohlcv.low(), ohlcv.close(), 0.02, 0.2).unwrap();

        prop_assert_eq!(out.bull[0], 0.0);
        prop_assert_eq!(out.bear[0], 0.0);
        prop_assert_eq!(out.bull[1], 0.0);
        prop_assert_eq!(out.bear[1], 0.0);

        for i in 2..ohlcv.len() {
            let bull = out.bull[i] != 0.0;
            let bear = out.bear[i] != 0.0;
            prop_assert!(bull != bear, "bar {}: bull {} bear {}", i, out.bull[i], out.bear[i]);
        }
    }

    /// A bull stop that did not reverse sits at or below the prior two lows.
    #[test]
    fn psar_bull_clamp(ohlcv in valid_ohlcv_series(3, 80)) {
        let out = psar(ohlcv.high(), ohlcv.low(), ohlcv.close(), 0.02, 0.2).unwrap();
        let low = ohlcv.low();
        let high = ohlcv.high();

        for i in 3..ohlcv.len() {
            // a bar that stays bull continues the previous bull run
            if out.bull[i] != 0.0 && out.bull[i - 1] != 0.0 {
                prop_assert!(out.bull[i] <= low[i - 1].min(low[i - 2]));
            }
            if out.bear[i] != 0.0 && out.bear[i - 1] != 0.0 {
                prop_assert!(out.bear[i] >= high[i - 1].max(high[i - 2]));
            }
        }
    }
}

// ============================================================================
// Resampling Property Tests
// ============================================================================

proptest! {
    /// Resampling to the existing frequency reproduces the frame.
    #[test]
    fn resample_own_frequency_is_identity(ohlcv in valid_ohlcv_series(1, 60)) {
        let resampled = ohlcv.resample(60).unwrap();
        prop_assert_eq!(&resampled, &ohlcv);

        let closes = ohlcv.close().resample(60, ORIGIN_EPOCH).unwrap();
        for resampled in [
            closes.first(),
            closes.last(),
            closes.min(),
            closes.max(),
            closes.sum(),
        ] {
            prop_assert!(resampled.same_values(ohlcv.close()));
        }
    }

    /// Volume is conserved by resampling.
    #[test]
    fn resample_conserves_volume(
        ohlcv in valid_ohlcv_series(1, 120),
        factor in 2i64..=30,
    ) {
        let resampled = ohlcv.resample(60 * factor).unwrap();
        let before = ohlcv.volume().sum();
        let after = resampled.volume().sum();

        prop_assert!((before - after).abs() <= 1e-6 * before.max(1.0));
        prop_assert!(resampled.high().max() == ohlcv.high().max());
    }
}
