//! Hypergeometric distribution `H(N, K, n)`: successes among `n` draws
//! without replacement from a population of `N` holding `K` successes.

use std::collections::BTreeMap;

use drv_core::{Error, Result};

use crate::math::{binomial_coefficient, ln_binomial_coefficient};
use crate::variable::ProbabilityTable;

/// Largest accepted population.
pub const MAX_POPULATION: u64 = 100_000;

/// Check `0 < N <= MAX_POPULATION`, `0 <= K <= N`, `0 < n <= N`.
pub fn validate(population: u64, successes: u64, draws: u64) -> Result<()> {
    if population == 0 {
        return Err(Error::domain("hypergeometric", "N", "N > 0", population));
    }
    if population > MAX_POPULATION {
        return Err(Error::domain("hypergeometric", "N", "N <= 100000", population));
    }
    if successes > population {
        return Err(Error::domain("hypergeometric", "K", "0 <= K <= N", successes));
    }
    if draws == 0 || draws > population {
        return Err(Error::domain("hypergeometric", "n", "0 < n <= N", draws));
    }
    Ok(())
}

/// Closed support `[max(0, n - (N - K)), min(n, K)]`.
///
/// Out-of-domain arguments (`K > N` or `n > N`) yield an empty range, `lo > hi`.
pub fn support(population: u64, successes: u64, draws: u64) -> (u64, u64) {
    if successes > population || draws > population {
        return (1, 0);
    }
    let lo = draws.saturating_sub(population - successes);
    let hi = draws.min(successes);
    (lo, hi)
}

/// `P(X = k) = C(K, k) C(N - K, n - k) / C(N, n)`; zero outside the support
/// and for out-of-domain parameters.
pub fn pmf(k: u64, population: u64, successes: u64, draws: u64) -> f64 {
    let (lo, hi) = support(population, successes, draws);
    if k < lo || k > hi {
        return 0.0;
    }
    let failures = population - successes;
    let denom = binomial_coefficient(population, draws);
    let num = binomial_coefficient(successes, k) * binomial_coefficient(failures, draws - k);
    if denom.is_finite() && num.is_finite() {
        return num / denom;
    }
    (ln_binomial_coefficient(successes, k) + ln_binomial_coefficient(failures, draws - k)
        - ln_binomial_coefficient(population, draws))
    .exp()
}

/// Probability table over exactly the possible values (not yet normalized).
pub fn table(population: u64, successes: u64, draws: u64) -> Result<ProbabilityTable> {
    validate(population, successes, draws)?;
    let (lo, hi) = support(population, successes, draws);
    let table: BTreeMap<i64, f64> =
        (lo..=hi).map(|k| (k as i64, pmf(k, population, successes, draws))).collect();
    log::debug!(
        "hypergeometric(N={}, K={}, n={}): support [{}, {}]",
        population,
        successes,
        draws,
        lo,
        hi
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_n10_k5_n3() {
        let t = table(10, 5, 3).unwrap();
        assert_eq!(t.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_relative_eq!(t[&2], 10.0 * 5.0 / 120.0, epsilon = 1e-15);
        assert_relative_eq!(t.values().sum::<f64>(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_support_excludes_impossible_values() {
        // N=10, K=8, n=5: at least 3 successes are forced.
        assert_eq!(support(10, 8, 5), (3, 5));
        let t = table(10, 8, 5).unwrap();
        assert_eq!(*t.keys().next().unwrap(), 3);
        assert_eq!(pmf(2, 10, 8, 5), 0.0);
        assert_eq!(pmf(6, 10, 8, 5), 0.0);
    }

    #[test]
    fn test_degenerate_all_successes() {
        let t = table(6, 6, 4).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t[&4], 1.0);
    }

    #[test]
    fn test_no_successes() {
        let t = table(6, 0, 4).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t[&0], 1.0);
    }

    #[test]
    fn test_large_population_log_fallback() {
        let t = table(5_000, 2_500, 1_000).unwrap();
        assert!(t.values().all(|p| p.is_finite()));
        assert_relative_eq!(t.values().sum::<f64>(), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_out_of_domain_queries_are_empty() {
        let (lo, hi) = support(10, 11, 3);
        assert!(lo > hi);
        assert!(support(10, 5, 11).0 > support(10, 5, 11).1);
        for k in 0..5 {
            assert_eq!(pmf(k, 10, 11, 3), 0.0);
            assert_eq!(pmf(k, 4, 2, 7), 0.0);
        }
    }

    #[test]
    fn test_invalid_params() {
        assert!(table(0, 0, 0).is_err());
        assert!(matches!(
            table(10, 11, 3),
            Err(Error::ParameterDomain { parameter: "K", .. })
        ));
        assert!(table(10, 5, 0).is_err());
        assert!(table(10, 5, 11).is_err());
    }
}
