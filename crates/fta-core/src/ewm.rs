//! Exponentially weighted recursion.
//!
//! The smoothing factor is given as a [`Decay`]: an explicit `alpha`, a
//! `span` (`alpha = 2 / (span + 1)`) or a center of mass
//! (`alpha = 1 / (1 + com)`).
//!
//! Two flags select the weighting:
//!
//! | adjust | bias  | recursion                                              |
//! |--------|-------|--------------------------------------------------------|
//! | true   | any   | weights `(1-alpha)^k` normalized by their partial sum   |
//! | false  | true  | Wilder: weights `alpha(1-alpha)^k` normalized by their sum |
//! | false  | false | plain `y = (1-alpha) y + alpha x`                       |
//!
//! Leading NaN values produce NaN. Later NaN values hold the previous
//! output and keep decaying the weight of past observations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::num::TaFloat;
use crate::series::Series;

/// Parametrization of the smoothing factor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Decay {
    /// Smoothing factor directly, `0 < alpha <= 1`.
    Alpha(f64),
    /// Span, `span >= 1`.
    Span(f64),
    /// Center of mass, `com >= 0`.
    Com(f64),
}

impl Decay {
    /// Resolve to the smoothing factor `alpha`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidParameter`] if the value is out of range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fta_core::Decay;
    ///
    /// assert_eq!(Decay::Span(9.0).alpha().unwrap(), 0.2);
    /// assert_eq!(Decay::Com(1.0).alpha().unwrap(), 0.5);
    /// assert!(Decay::Span(0.5).alpha().is_err());
    /// ```
    pub fn alpha(self) -> Result<f64> {
        match self {
            Self::Alpha(alpha) if alpha > 0.0 && alpha <= 1.0 => Ok(alpha),
            Self::Alpha(alpha) => Err(IndicatorError::invalid_parameter(
                "alpha",
                alpha,
                "0 < alpha <= 1",
            )),
            Self::Span(span) if span >= 1.0 => Ok(2.0 / (span + 1.0)),
            Self::Span(span) => Err(IndicatorError::invalid_parameter(
                "span",
                span,
                "span >= 1",
            )),
            Self::Com(com) if com >= 0.0 => Ok(1.0 / (1.0 + com)),
            Self::Com(com) => Err(IndicatorError::invalid_parameter("com", com, "com >= 0")),
        }
    }
}

/// Exponentially weighted view over a [`Series`].
#[derive(Clone, Copy, Debug)]
pub struct Ewm<'a, T: TaFloat> {
    series: &'a Series<T>,
    alpha: f64,
    adjust: bool,
    bias: bool,
}

impl<'a, T: TaFloat> Ewm<'a, T> {
    pub(crate) fn new(series: &'a Series<T>, decay: Decay) -> Result<Self> {
        Ok(Self {
            series,
            alpha: decay.alpha()?,
            adjust: true,
            bias: false,
        })
    }

    /// Normalize early weights by their partial sum (default `true`).
    #[must_use]
    pub fn adjust(mut self, adjust: bool) -> Self {
        self.adjust = adjust;
        self
    }

    /// Normalize the non-adjusted recursion by its cumulative weight (default `false`).
    #[must_use]
    pub fn bias(mut self, bias: bool) -> Self {
        self.bias = bias;
        self
    }

    /// The resolved smoothing factor.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Exponentially weighted mean.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fta_core::{Decay, Series};
    ///
    /// let series: Series<f64> = Series::from_vec(vec![1.0, 2.0, 3.0]);
    /// let plain = series.ewm(Decay::Alpha(0.5)).unwrap().adjust(false).mean();
    ///
    /// assert_eq!(plain.as_slice(), &[1.0, 1.5, 2.25]);
    /// ```
    #[must_use]
    pub fn mean(&self) -> Series<T> {
        let alpha = T::from_f64_lossy(self.alpha);
        let decay = T::ONE - alpha;
        let normalized = self.adjust || self.bias;
        let new_wt = if self.adjust { T::ONE } else { alpha };

        let data = self.series.as_slice();
        let mut result = Vec::with_capacity(data.len());

        let Some(start) = data.iter().position(|x| !x.is_nan()) else {
            return Series::nan(self.series.index().clone());
        };
        result.resize(start, T::NAN);

        let mut weighted = data[start];
        let mut old_wt = if self.bias && !self.adjust {
            alpha
        } else {
            T::ONE
        };
        result.push(weighted);

        for &x in &data[start + 1..] {
            old_wt = old_wt * decay;
            if !x.is_nan() {
                if weighted != x {
                    weighted = (old_wt * weighted + new_wt * x) / (old_wt + new_wt);
                }
                old_wt = if normalized { old_wt + new_wt } else { T::ONE };
            }
            result.push(weighted);
        }

        self.series.with_values(result)
    }
}
