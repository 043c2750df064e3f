//! Binomial distribution `B(n, p)`.

use std::collections::BTreeMap;

use drv_core::{Error, Result};

use crate::math::{binomial_coefficient, ln_binomial_coefficient};
use crate::variable::ProbabilityTable;

/// Largest accepted number of trials.
pub const MAX_TRIALS: u64 = 100_000;

/// Check `1 <= n <= MAX_TRIALS` and `0 <= p <= 1`.
pub fn validate(n: u64, p: f64) -> Result<()> {
    if n < 1 {
        return Err(Error::domain("binomial", "n", "n >= 1", n));
    }
    if n > MAX_TRIALS {
        return Err(Error::domain("binomial", "n", "n <= 100000", n));
    }
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(Error::domain("binomial", "p", "0 <= p <= 1", p));
    }
    Ok(())
}

/// `P(X = k)` for `X ~ B(n, p)`; zero when `k > n`.
///
/// Parameters are assumed valid (see [`validate`]).
pub fn pmf(k: u64, n: u64, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    let kf = k as f64;
    let rest = (n - k) as f64;
    let c = binomial_coefficient(n, k);
    if c.is_finite() {
        return c * p.powf(kf) * (1.0 - p).powf(rest);
    }
    // C(n, k) overflowed: evaluate the whole term in log space.
    (ln_binomial_coefficient(n, k) + kf * p.ln() + rest * (-p).ln_1p()).exp()
}

/// Probability table over the support `{0, ..., n}` (not yet normalized).
pub fn table(n: u64, p: f64) -> Result<ProbabilityTable> {
    validate(n, p)?;
    let table: BTreeMap<i64, f64> = (0..=n).map(|k| (k as i64, pmf(k, n, p))).collect();
    log::debug!("binomial(n={}, p={}): {} terms", n, p, table.len());
    Ok(table)
}
