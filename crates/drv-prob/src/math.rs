//! Combinatorial primitives shared by the generators.

use statrs::function::gamma::ln_gamma;

/// `n!` as `f64`.
///
/// Exact up to `n = 22`; overflows to `+inf` past `n = 170`.
pub fn factorial(n: u64) -> f64 {
    (2..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// `ln(n!)` via the log-gamma function.
#[inline]
pub fn ln_factorial(n: u64) -> f64 {
    ln_gamma(n as f64 + 1.0)
}

/// Binomial coefficient `C(n, k)` as `f64`, zero when `k > n`.
///
/// Multiplicative form: for `i in 0..min(k, n-k)` multiply by `n - i` then
/// divide by `i + 1`. Every partial product is itself a binomial coefficient,
/// so intermediate values stay exact far longer than `n! / (k! (n-k)!)`.
pub fn binomial_coefficient(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut c = 1.0;
    for i in 0..k {
        c *= (n - i) as f64;
        c /= (i + 1) as f64;
    }
    c
}

/// `ln C(n, k)`; `-inf` when `k > n`.
pub fn ln_binomial_coefficient(n: u64, k: u64) -> f64 {
    // ln(n choose k) = ln Γ(n+1) - ln Γ(k+1) - ln Γ(n-k+1)
    if k > n {
        return f64::NEG_INFINITY;
    }
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_factorial_small_values() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(5), 120.0);
        assert_eq!(factorial(10), 3_628_800.0);
        assert!(factorial(171).is_infinite());
    }

    #[test]
    fn test_ln_factorial_matches_factorial() {
        for n in [0u64, 1, 2, 7, 20, 50] {
            assert_relative_eq!(ln_factorial(n), factorial(n).ln(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_binomial_coefficient_known_values() {
        assert_eq!(binomial_coefficient(10, 5), 252.0);
        assert_eq!(binomial_coefficient(10, 0), 1.0);
        assert_eq!(binomial_coefficient(10, 10), 1.0);
        assert_eq!(binomial_coefficient(10, 3), 120.0);
        assert_eq!(binomial_coefficient(3, 4), 0.0);
        assert_eq!(binomial_coefficient(0, 0), 1.0);
    }

    #[test]
    fn test_binomial_coefficient_symmetry() {
        for n in 0..40u64 {
            for k in 0..=n {
                assert_eq!(binomial_coefficient(n, k), binomial_coefficient(n, n - k));
            }
        }
    }

    #[test]
    fn test_binomial_coefficient_beyond_factorial_range() {
        // 200! overflows, C(200, 3) does not.
        assert_eq!(binomial_coefficient(200, 3), 1_313_400.0);
        assert_relative_eq!(
            ln_binomial_coefficient(200, 100),
            binomial_coefficient(200, 100).ln(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_ln_binomial_coefficient_out_of_range() {
        assert!(ln_binomial_coefficient(3, 4).is_infinite());
        assert_relative_eq!(ln_binomial_coefficient(6, 0), 0.0, epsilon = 1e-12);
    }
}
