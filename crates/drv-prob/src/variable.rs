//! Discrete random variable over an integer support.

use std::collections::BTreeMap;
use std::fmt;

use drv_core::{Error, Result};

/// Mapping from support value to probability, kept in ascending key order.
pub type ProbabilityTable = BTreeMap<i64, f64>;

/// Tolerance of [`DiscreteRandomVariable::validate`] on the total mass.
pub const VALIDATION_TOLERANCE: f64 = 1e-6;

/// Tolerance of [`DiscreteRandomVariable::is_normalized`].
pub const NORMALIZED_TOLERANCE: f64 = 1e-10;

/// A named probability table.
///
/// The table is unconstrained while it is being built; [`validate`] is the
/// gate that must pass before statistics are computed.
///
/// [`validate`]: DiscreteRandomVariable::validate
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteRandomVariable {
    name: String,
    description: String,
    table: ProbabilityTable,
}

impl Default for DiscreteRandomVariable {
    fn default() -> Self {
        Self::new("X", "")
    }
}

impl DiscreteRandomVariable {
    /// Empty variable with a display name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into(), table: BTreeMap::new() }
    }

    /// Build a normalized, validated variable from free-form `(x, p)` rows.
    ///
    /// Values are rounded to the nearest integer and rows landing on the same
    /// integer are merged by summing their probabilities.
    pub fn from_pairs(
        name: impl Into<String>,
        description: impl Into<String>,
        pairs: &[(f64, f64)],
    ) -> Result<Self> {
        let mut table = ProbabilityTable::new();
        for &(x, p) in pairs {
            if !x.is_finite() {
                return Err(Error::ImportFormat(format!("value {} is not a finite number", x)));
            }
            let rounded = x.round();
            // i64::MAX as f64 is 2^63, one past the largest i64.
            if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
                return Err(Error::ImportFormat(format!("value {} is outside the i64 range", x)));
            }
            let x = rounded as i64;
            if !p.is_finite() || p < 0.0 {
                return Err(Error::ProbabilityRange { x, probability: p });
            }
            *table.entry(x).or_insert(0.0) += p;
        }

        let mut rv = Self::new(name, description);
        rv.load_distribution(table)?;
        rv.normalize()?;
        rv.validate()?;
        Ok(rv)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Read access to the table.
    pub fn distribution(&self) -> &ProbabilityTable {
        &self.table
    }

    /// Number of support values.
    pub fn support_size(&self) -> usize {
        self.table.len()
    }

    /// Replace the table wholesale.
    pub fn load_distribution(&mut self, table: ProbabilityTable) -> Result<()> {
        if table.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.table = table;
        Ok(())
    }

    /// Total probability mass.
    pub fn total(&self) -> f64 {
        self.table.values().sum()
    }

    /// Rescale every probability by `1 / total`.
    pub fn normalize(&mut self) -> Result<()> {
        let sum = self.total();
        if !sum.is_finite() || sum <= 0.0 {
            return Err(Error::DegenerateSum { sum });
        }
        for p in self.table.values_mut() {
            *p /= sum;
        }
        log::trace!("normalized {} terms (previous total {})", self.table.len(), sum);
        Ok(())
    }

    /// Check the probability axioms.
    ///
    /// Fails when the table is empty, when a probability lies outside
    /// `[0, 1]`, or when the total differs from 1 by more than
    /// [`VALIDATION_TOLERANCE`].
    pub fn validate(&self) -> Result<()> {
        if self.table.is_empty() {
            return Err(Error::EmptySupport);
        }
        if let Some((&x, &probability)) =
            self.table.iter().find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(Error::ProbabilityRange { x, probability });
        }
        let sum = self.total();
        if (sum - 1.0).abs() > VALIDATION_TOLERANCE {
            return Err(Error::NotNormalized { sum });
        }
        Ok(())
    }

    /// Whether the total is within [`NORMALIZED_TOLERANCE`] of 1. Never fails.
    pub fn is_normalized(&self) -> bool {
        !self.table.is_empty() && (self.total() - 1.0).abs() < NORMALIZED_TOLERANCE
    }

    /// `P(X = x)`, zero off the support.
    pub fn pmf(&self, x: i64) -> f64 {
        self.table.get(&x).copied().unwrap_or(0.0)
    }

    /// `P(X <= x)`.
    pub fn cdf(&self, x: i64) -> f64 {
        self.table.range(..=x).map(|(_, p)| p).sum()
    }

    /// `P(a <= X <= b)`; the bounds are swapped when `a > b`.
    pub fn probability_interval(&self, a: i64, b: i64) -> Result<f64> {
        if self.table.is_empty() {
            return Err(Error::EmptySupport);
        }
        let (lo, hi) = if a > b { (b, a) } else { (a, b) };
        Ok(self.table.range(lo..=hi).map(|(_, p)| p).sum())
    }

    /// Support values in ascending order.
    pub fn sorted_support(&self) -> Result<Vec<i64>> {
        if self.table.is_empty() {
            return Err(Error::EmptySupport);
        }
        Ok(self.table.keys().copied().collect())
    }

    /// Smallest and largest support value.
    pub fn range(&self) -> Result<(i64, i64)> {
        let min = self.table.keys().next().ok_or(Error::EmptySupport)?;
        let max = self.table.keys().next_back().ok_or(Error::EmptySupport)?;
        Ok((*min, *max))
    }
}

impl fmt::Display for DiscreteRandomVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            writeln!(f, "{}", self.name)?;
        } else {
            writeln!(f, "{} ({})", self.name, self.description)?;
        }
        for (x, p) in &self.table {
            writeln!(f, "P({}={}) = {:.6e}", self.name, x, p)?;
        }
        Ok(())
    }
}
