//! Common test utilities for fta.
//!
//! This module provides float comparison and synthetic data generation
//! for the integration tests.

#![allow(dead_code)]

use fta_core::{Bar, OhlcvSeries, Series};

/// Tiered float comparison with tolerance levels.
///
/// Uses the following tolerance levels based on magnitude:
/// - For values near zero (|expected| < 1e-10): use absolute tolerance
/// - For larger values: use relative tolerance
pub fn assert_float_eq(actual: f64, expected: f64, epsilon: f64, context: &str) {
    if expected.is_nan() {
        assert!(
            actual.is_nan(),
            "{}: Expected NaN but got {}",
            context,
            actual
        );
        return;
    }

    if actual.is_nan() {
        panic!("{}: Got NaN but expected {}", context, expected);
    }

    if expected.is_infinite() {
        assert!(
            actual.is_infinite() && actual.signum() == expected.signum(),
            "{}: Expected {} but got {}",
            context,
            expected,
            actual
        );
        return;
    }

    // For values very close to zero, use absolute comparison
    if expected.abs() < 1e-10 {
        let diff = (actual - expected).abs();
        assert!(
            diff < epsilon,
            "{}: Expected {} but got {} (diff: {})",
            context,
            expected,
            actual,
            diff
        );
        return;
    }

    let rel_diff = ((actual - expected) / expected).abs();
    assert!(
        rel_diff < epsilon,
        "{}: Expected {} but got {} (rel diff: {:.2e})",
        context,
        expected,
        actual,
        rel_diff
    );
}

/// Assert a series matches the expected values with tolerance.
pub fn assert_series_eq(actual: &Series<f64>, expected: &[f64], epsilon: f64, name: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: Length mismatch: {} vs {}",
        name,
        actual.len(),
        expected.len()
    );

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let context = format!("{}[{}]", name, i);
        assert_float_eq(a, e, epsilon, &context);
    }
}

// ============================================================================
// Synthetic Data Generators
// ============================================================================

/// Generate constant price series.
pub fn generate_constant(value: f64, len: usize) -> Series<f64> {
    Series::from_vec(vec![value; len])
}

/// Generate linear price series.
pub fn generate_linear(start: f64, step: f64, len: usize) -> Series<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

/// Generate sine wave price series.
pub fn generate_sine(center: f64, amplitude: f64, period: usize, len: usize) -> Series<f64> {
    use std::f64::consts::PI;
    (0..len)
        .map(|i| center + amplitude * (2.0 * PI * i as f64 / period as f64).sin())
        .collect()
}

/// Generate random walk price series with deterministic seed.
pub fn generate_random_walk(start: f64, volatility: f64, len: usize, seed: u64) -> Vec<f64> {
    // Simple LCG for deterministic random numbers
    let mut rng_state = seed;
    let lcg_next = |state: &mut u64| -> f64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        // Convert to [-1, 1]
        (*state as f64 / u64::MAX as f64) * 2.0 - 1.0
    };

    let mut prices = Vec::with_capacity(len);
    let mut last = start;

    for i in 0..len {
        if i > 0 {
            let change = lcg_next(&mut rng_state) * volatility;
            last = (last + change).max(0.01); // Ensure positive price
        }
        prices.push(last);
    }

    prices
}

/// Build a frame of `freq`-spaced bars from close prices.
///
/// Each bar opens at the previous close and spans `range_pct` of its close
/// beyond the open/close body.
pub fn generate_ohlcv_from_close(close: &[f64], range_pct: f64, freq: i64) -> OhlcvSeries<f64> {
    let bars: Vec<Bar<f64>> = close
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let range = c * range_pct;
            let o = if i == 0 { c } else { close[i - 1] };
            let h = c.max(o) + range * 0.5;
            let l = c.min(o) - range * 0.5;
            let v = 1000.0 + (i as f64 * 100.0);
            Bar::new(i as i64 * freq, o, h, l, c, v)
        })
        .collect();

    OhlcvSeries::from_bars(freq, &bars).unwrap()
}

/// Render a frame as headerless `time,open,high,low,close,volume` CSV rows.
pub fn to_csv(ohlcv: &OhlcvSeries<f64>, unit: i64) -> String {
    ohlcv
        .iter()
        .map(|bar| {
            format!(
                "{},{},{},{},{},{}\n",
                bar.timestamp / unit,
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_float_eq_normal() {
        assert_float_eq(1.0, 1.0, 1e-10, "test");
        assert_float_eq(100.0, 100.0000001, 1e-6, "test");
    }

    #[test]
    fn test_assert_float_eq_nan() {
        assert_float_eq(f64::NAN, f64::NAN, 1e-10, "test");
    }

    #[test]
    #[should_panic]
    fn test_assert_float_eq_nan_mismatch() {
        assert_float_eq(1.0, f64::NAN, 1e-10, "test");
    }

    #[test]
    fn test_generate_linear() {
        let data = generate_linear(100.0, 1.0, 5);
        assert_eq!(data.as_slice(), &[100.0, 101.0, 102.0, 103.0, 104.0]);
    }

    #[test]
    fn test_generate_random_walk_deterministic() {
        let data1 = generate_random_walk(100.0, 1.0, 10, 12345);
        let data2 = generate_random_walk(100.0, 1.0, 10, 12345);
        assert_eq!(data1, data2);
        assert_eq!(data1[0], 100.0);
    }

    #[test]
    fn test_generate_ohlcv_bars_are_valid() {
        let ohlcv = generate_ohlcv_from_close(&generate_random_walk(50.0, 2.0, 20, 7), 0.02, 60);
        assert_eq!(ohlcv.len(), 20);
        assert!(ohlcv.iter().all(|bar| bar.is_valid()));
    }
}
