//! Geometric distribution `Ge(p)`: trial index of the first success.

use std::collections::BTreeMap;

use drv_core::{Error, Result};

use crate::truncation::TruncationPolicy;
use crate::variable::ProbabilityTable;

/// Check `0 < p <= 1`.
pub fn validate(p: f64) -> Result<()> {
    if !p.is_finite() || p <= 0.0 || p > 1.0 {
        return Err(Error::domain("geometric", "p", "0 < p <= 1", p));
    }
    Ok(())
}

/// `P(X = k) = (1-p)^(k-1) p` for `k >= 1`, zero at `k = 0`.
pub fn pmf(k: u64, p: f64) -> f64 {
    if k == 0 {
        return 0.0;
    }
    (1.0 - p).powf((k - 1) as f64) * p
}

/// Truncated probability table starting at `k = 1` (not yet normalized).
pub fn table(p: f64, policy: &TruncationPolicy) -> Result<ProbabilityTable> {
    validate(p)?;
    let q = 1.0 - p;

    let mut table = BTreeMap::new();
    let mut prob = p;
    table.insert(1i64, prob);

    let mut k: i64 = 2;
    loop {
        let next = prob * q;
        if policy.should_stop(table.len(), next, 1) {
            break;
        }
        table.insert(k, next);
        prob = next;
        k += 1;
    }

    if policy.is_capped(table.len()) {
        log::warn!(
            "geometric(p={}): truncated at the {} term cap, tail mass folded into normalization",
            p,
            policy.max_terms
        );
    }
    log::debug!("geometric(p={}): {} terms", p, table.len());
    Ok(table)
}
