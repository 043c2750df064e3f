//! Moment-based descriptive statistics of a discrete random variable.
//!
//! All statistics are computed in one pass over the sorted support after the
//! variable has passed [`DiscreteRandomVariable::validate`]. Quantiles are the
//! smallest support value at which the running CDF reaches the level.

use drv_core::{Error, Result, StatisticalSummary};

use crate::variable::DiscreteRandomVariable;

/// Below this standard deviation the distribution is a point mass and the
/// shape statistics are reported as zero.
pub const DEGENERATE_SIGMA: f64 = 1e-12;

/// Below this `|mean|` the coefficient of variation is reported as zero.
pub const DEGENERATE_MEAN: f64 = 1e-12;

/// Raw moments `E[X^k]`, `k = 1..4`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMoments {
    pub v1: f64,
    pub v2: f64,
    pub v3: f64,
    pub v4: f64,
}

impl RawMoments {
    /// Accumulate over `(x, p)` pairs with incremental powers.
    pub fn accumulate<'a>(pairs: impl IntoIterator<Item = (&'a i64, &'a f64)>) -> Self {
        let mut m = Self::default();
        for (&x, &p) in pairs {
            let x1 = x as f64;
            let x2 = x1 * x1;
            let x3 = x2 * x1;
            let x4 = x3 * x1;
            m.v1 += x1 * p;
            m.v2 += x2 * p;
            m.v3 += x3 * p;
            m.v4 += x4 * p;
        }
        m
    }

    /// `v2 - v1^2`, clamped at zero against rounding.
    pub fn variance(&self) -> f64 {
        (self.v2 - self.v1 * self.v1).max(0.0)
    }

    /// Third central moment `v3 - 3 v2 v1 + 2 v1^3`.
    pub fn central_third(&self) -> f64 {
        let v1 = self.v1;
        self.v3 - 3.0 * self.v2 * v1 + 2.0 * v1 * v1 * v1
    }

    /// Fourth central moment `v4 - 4 v3 v1 + 6 v2 v1^2 - 3 v1^4`.
    pub fn central_fourth(&self) -> f64 {
        let v1 = self.v1;
        let v1_2 = v1 * v1;
        self.v4 - 4.0 * self.v3 * v1 + 6.0 * self.v2 * v1_2 - 3.0 * v1_2 * v1_2
    }
}

/// Smallest support value whose CDF reaches `level`.
///
/// Returns the largest support value if rounding keeps the running sum just
/// below `level`. Fails only on an empty table.
pub fn quantile(rv: &DiscreteRandomVariable, level: f64) -> Result<i64> {
    let (_, max) = rv.range()?;
    let mut cumulative = 0.0;
    for (&x, &p) in rv.distribution() {
        cumulative += p;
        if cumulative >= level {
            return Ok(x);
        }
    }
    Ok(max)
}

/// Most probable support value; ties go to the smallest value.
pub fn mode(rv: &DiscreteRandomVariable) -> Result<i64> {
    let mut best: Option<(i64, f64)> = None;
    for (&x, &p) in rv.distribution() {
        match best {
            Some((_, best_p)) if p <= best_p => {}
            _ => best = Some((x, p)),
        }
    }
    best.map(|(x, _)| x).ok_or(Error::EmptySupport)
}

/// Compute every descriptive statistic of a validated variable.
///
/// Validation failures are propagated unchanged.
pub fn calculate(rv: &DiscreteRandomVariable) -> Result<StatisticalSummary> {
    rv.validate()?;

    let (min, max) = rv.range()?;
    let m = RawMoments::accumulate(rv.distribution());

    let mean = m.v1;
    let variance = m.variance();
    let sigma = variance.sqrt();

    let mu3 = m.central_third();
    let mu4 = m.central_fourth();

    let (skewness, kurtosis) = if sigma > DEGENERATE_SIGMA {
        let s2 = sigma * sigma;
        (mu3 / (s2 * sigma), mu4 / (s2 * s2) - 3.0)
    } else {
        (0.0, 0.0)
    };

    let mode = mode(rv)?;
    let median = quantile(rv, 0.5)?;
    let q1 = quantile(rv, 0.25)?;
    let q3 = quantile(rv, 0.75)?;

    let coefficient_of_variation =
        if mean.abs() > DEGENERATE_MEAN { sigma / mean.abs() } else { 0.0 };

    Ok(StatisticalSummary {
        mean,
        second_moment: m.v2,
        third_moment: m.v3,
        fourth_moment: m.v4,
        variance,
        standard_deviation: sigma,
        central_second_moment: variance,
        central_third_moment: mu3,
        central_fourth_moment: mu4,
        skewness,
        kurtosis,
        mode,
        median,
        q1,
        q3,
        interquartile_range: (q3 - q1) as f64,
        min,
        max,
        range: max - min,
        coefficient_of_variation,
        relative_std_dev_pct: coefficient_of_variation * 100.0,
    })
}
