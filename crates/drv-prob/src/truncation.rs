//! Truncation of infinite-support families to a finite table.

use drv_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default tail threshold: terms below this mass are negligible.
pub const DEFAULT_TAIL_THRESHOLD: f64 = 1e-15;

/// Default hard cap on emitted terms.
pub const DEFAULT_MAX_TERMS: usize = 100_000;

/// When to stop emitting terms of an infinite-support distribution.
///
/// Generation stops once the next term falls below `tail_threshold` and at
/// least a family-specific minimum number of terms has been emitted, or once
/// `max_terms` terms exist. Mass beyond the cut is folded back in by
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TruncationPolicy {
    /// Per-term probability below which the tail may be dropped.
    pub tail_threshold: f64,
    /// Hard cap on the number of emitted terms.
    pub max_terms: usize,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self { tail_threshold: DEFAULT_TAIL_THRESHOLD, max_terms: DEFAULT_MAX_TERMS }
    }
}

impl TruncationPolicy {
    /// Create a checked policy.
    pub fn new(tail_threshold: f64, max_terms: usize) -> Result<Self> {
        let policy = Self { tail_threshold, max_terms };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the fields; useful after deserialization.
    pub fn validate(&self) -> Result<()> {
        if !self.tail_threshold.is_finite() || self.tail_threshold < 0.0 {
            return Err(Error::domain(
                "truncation",
                "tail_threshold",
                "finite and >= 0",
                self.tail_threshold,
            ));
        }
        if self.max_terms == 0 {
            return Err(Error::domain("truncation", "max_terms", "max_terms >= 1", self.max_terms));
        }
        Ok(())
    }

    /// Stopping rule, evaluated before emitting the next term.
    ///
    /// `emitted` counts the terms already in the table, `next_probability` is
    /// the mass of the candidate term.
    #[inline]
    pub fn should_stop(&self, emitted: usize, next_probability: f64, min_terms: usize) -> bool {
        emitted >= self.max_terms
            || (next_probability < self.tail_threshold && emitted >= min_terms)
    }

    /// Whether `emitted` has reached the hard cap.
    #[inline]
    pub fn is_capped(&self, emitted: usize) -> bool {
        emitted >= self.max_terms
    }
}
