//! Poisson distribution `Po(lambda)`.

use std::collections::BTreeMap;

use drv_core::{Error, Result};

use crate::math::{factorial, ln_factorial};
use crate::truncation::TruncationPolicy;
use crate::variable::ProbabilityTable;

/// Largest accepted rate.
pub const MAX_LAMBDA: f64 = 1_000.0;

/// Check `0 < lambda <= MAX_LAMBDA`.
pub fn validate(lambda: f64) -> Result<()> {
    if !lambda.is_finite() || lambda <= 0.0 {
        return Err(Error::domain("poisson", "lambda", "lambda > 0", lambda));
    }
    if lambda > MAX_LAMBDA {
        return Err(Error::domain("poisson", "lambda", "lambda <= 1000", lambda));
    }
    Ok(())
}

/// Closed-form `P(X = k) = lambda^k e^-lambda / k!`.
pub fn pmf(k: u64, lambda: f64) -> f64 {
    let kf = k as f64;
    let direct = lambda.powf(kf) * (-lambda).exp() / factorial(k);
    if direct.is_finite() && direct > 0.0 {
        return direct;
    }
    (kf * lambda.ln() - lambda - ln_factorial(k)).exp()
}

/// Minimum number of terms before the tail threshold may stop generation.
///
/// Terms increase up to the mode `floor(lambda)`, so a small leading term
/// (large `lambda`) must not end the table.
pub fn min_terms(lambda: f64) -> usize {
    lambda.ceil() as usize + 1
}

/// Truncated probability table starting at `k = 0` (not yet normalized).
///
/// Each term is the previous one times `lambda / k`. The running product is
/// kept as a logarithm so an underflowing `e^-lambda` does not zero the table.
pub fn table(lambda: f64, policy: &TruncationPolicy) -> Result<ProbabilityTable> {
    validate(lambda)?;
    let min_terms = min_terms(lambda);
    let ln_lambda = lambda.ln();

    let mut table = BTreeMap::new();
    let mut ln_p = -lambda;
    table.insert(0i64, ln_p.exp());

    let mut k: u64 = 1;
    loop {
        let next_ln = ln_p + ln_lambda - (k as f64).ln();
        let next = next_ln.exp();
        if policy.should_stop(table.len(), next, min_terms) {
            break;
        }
        table.insert(k as i64, next);
        ln_p = next_ln;
        k += 1;
    }

    if policy.is_capped(table.len()) {
        log::warn!(
            "poisson(lambda={}): truncated at the {} term cap, tail mass folded into normalization",
            lambda,
            policy.max_terms
        );
    }
    log::debug!("poisson(lambda={}): {} terms", lambda, table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lambda3_first_terms() {
        let t = table(3.0, &TruncationPolicy::default()).unwrap();
        assert_relative_eq!(t[&0], (-3.0f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(t[&1], 3.0 * (-3.0f64).exp(), epsilon = 1e-14);
        assert_relative_eq!(t[&4], pmf(4, 3.0), epsilon = 1e-14);
        // Truncated tail carries less than the threshold-scale mass.
        assert!((t.values().sum::<f64>() - 1.0).abs() < 1e-13);
    }

    #[test]
    fn test_stops_below_threshold() {
        let policy = TruncationPolicy::default();
        let t = table(3.0, &policy).unwrap();
        let (&last_k, &last_p) = t.iter().next_back().unwrap();
        assert!(last_p >= policy.tail_threshold);
        assert!(pmf(last_k as u64 + 1, 3.0) < policy.tail_threshold);
    }

    #[test]
    fn test_large_lambda_is_not_cut_at_start() {
        // e^-50 < 1e-15: the first term alone is below the threshold.
        let t = table(50.0, &TruncationPolicy::default()).unwrap();
        assert!(t.len() > 50);
        assert_relative_eq!(t.values().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lambda_upper_bound() {
        let policy = TruncationPolicy::default();
        assert!(table(MAX_LAMBDA, &policy).is_ok());
        for lambda in [1_000.5, 1e5, 1e6] {
            assert!(matches!(
                table(lambda, &policy),
                Err(Error::ParameterDomain { parameter: "lambda", .. })
            ));
        }
    }

    #[test]
    fn test_huge_lambda_survives_underflow() {
        // e^-800 underflows to 0.
        let t = table(800.0, &TruncationPolicy::default()).unwrap();
        assert_eq!(t[&0], 0.0);
        assert_relative_eq!(t.values().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cap_bounds_work() {
        let policy = TruncationPolicy::new(1e-15, 5).unwrap();
        let t = table(3.0, &policy).unwrap();
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn test_invalid_lambda() {
        let policy = TruncationPolicy::default();
        assert!(table(0.0, &policy).is_err());
        assert!(table(-2.0, &policy).is_err());
        assert!(table(f64::INFINITY, &policy).is_err());
    }
}
