//! Moment-matched alternative families for a computed summary.
//!
//! Display aid only: each candidate matches the summary's mean (and, for the
//! binomial, its variance) without any goodness-of-fit judgement.

use drv_core::StatisticalSummary;

use crate::family::DistributionSpec;

/// Candidate families matching the mean and variance of `summary`.
///
/// Order is Poisson, Geometric, Binomial. Candidates whose parameters fall
/// outside their family's domain are left out.
pub fn suggest_alternatives(summary: &StatisticalSummary) -> Vec<DistributionSpec> {
    let mean = summary.mean;
    let variance = summary.variance;
    let mut out = Vec::new();

    if mean > 0.0 {
        push_candidate(&mut out, DistributionSpec::poisson(mean));
    }
    if mean >= 1.0 {
        push_candidate(&mut out, DistributionSpec::geometric(1.0 / mean));
    }
    if variance > 0.0 && variance < mean {
        let p_hat = 1.0 - variance / mean;
        let n = (mean / p_hat).round().max(1.0);
        let p = (mean / n).clamp(0.0, 1.0);
        push_candidate(&mut out, DistributionSpec::binomial(n as u64, p));
    }
    out
}

fn push_candidate(out: &mut Vec<DistributionSpec>, candidate: drv_core::Result<DistributionSpec>) {
    match candidate {
        Ok(spec) => out.push(spec),
        Err(e) => log::debug!("skipping alternative: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::calculate;
    use crate::truncation::TruncationPolicy;
    use crate::variable::DiscreteRandomVariable;
    use approx::assert_relative_eq;

    fn summary_of(pairs: &[(i64, f64)]) -> StatisticalSummary {
        let mut rv = DiscreteRandomVariable::default();
        rv.load_distribution(pairs.iter().copied().collect()).unwrap();
        calculate(&rv).unwrap()
    }

    #[test]
    fn test_binomial_source_recovers_binomial() {
        let rv = DistributionSpec::binomial(10, 0.5)
            .unwrap()
            .generate(&TruncationPolicy::default())
            .unwrap();
        let alts = suggest_alternatives(&calculate(&rv).unwrap());
        assert_eq!(alts.len(), 3);
        match alts[0] {
            DistributionSpec::Poisson { lambda } => assert_relative_eq!(lambda, 5.0, epsilon = 1e-9),
            other => panic!("expected poisson, got {}", other),
        }
        match alts[1] {
            DistributionSpec::Geometric { p } => assert_relative_eq!(p, 0.2, epsilon = 1e-9),
            other => panic!("expected geometric, got {}", other),
        }
        match alts[2] {
            DistributionSpec::Binomial { n, p } => {
                assert_eq!(n, 10);
                assert_relative_eq!(p, 0.5, epsilon = 1e-9);
            }
            other => panic!("expected binomial, got {}", other),
        }
    }

    #[test]
    fn test_small_mean_skips_geometric() {
        // Bernoulli(0.5): mean 0.5, variance 0.25.
        let alts = suggest_alternatives(&summary_of(&[(0, 0.5), (1, 0.5)]));
        assert_eq!(
            alts,
            vec![
                DistributionSpec::Poisson { lambda: 0.5 },
                DistributionSpec::Binomial { n: 1, p: 0.5 },
            ]
        );
    }

    #[test]
    fn test_overdispersed_has_no_binomial() {
        // Mean 2, variance 4.
        let alts = suggest_alternatives(&summary_of(&[(0, 0.5), (4, 0.5)]));
        assert_eq!(alts.len(), 2);
        assert!(alts.iter().all(|a| !matches!(a, DistributionSpec::Binomial { .. })));
    }

    #[test]
    fn test_non_positive_mean_has_no_candidates() {
        assert!(suggest_alternatives(&summary_of(&[(-1, 0.5), (1, 0.5)])).is_empty());
        assert!(suggest_alternatives(&summary_of(&[(0, 1.0)])).is_empty());
    }
}
