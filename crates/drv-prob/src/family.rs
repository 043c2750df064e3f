//! Parametric families and the factory that builds them.
//!
//! The set of families is closed, so a [`DistributionSpec`] is a plain enum and
//! generation is one `match`. The factory only maps a family tag plus a flat
//! parameter list (as typed by a user) onto a checked spec.

use std::fmt;
use std::str::FromStr;

use drv_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::truncation::TruncationPolicy;
use crate::variable::{DiscreteRandomVariable, ProbabilityTable};
use crate::{binomial, geometric, hypergeometric, poisson};

/// Family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Binomial,
    Poisson,
    Geometric,
    Hypergeometric,
}

/// Registry of supported families with their parameter names, in display order.
const REGISTRY: [(Family, &[&str]); 4] = [
    (Family::Binomial, &["n", "p"]),
    (Family::Poisson, &["lambda"]),
    (Family::Geometric, &["p"]),
    (Family::Hypergeometric, &["N", "K", "n"]),
];

impl Family {
    /// Lower-case tag, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binomial => "binomial",
            Self::Poisson => "poisson",
            Self::Geometric => "geometric",
            Self::Hypergeometric => "hypergeometric",
        }
    }

    /// Parameter names in positional order.
    pub fn parameter_names(self) -> &'static [&'static str] {
        REGISTRY.iter().find(|(f, _)| *f == self).map(|(_, names)| *names).unwrap_or(&[])
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        REGISTRY
            .iter()
            .map(|(f, _)| *f)
            .find(|f| f.as_str() == tag)
            .ok_or_else(|| Error::UnsupportedFamily(s.to_string()))
    }
}

/// Families the factory can build.
pub fn available_families() -> Vec<Family> {
    REGISTRY.iter().map(|(f, _)| *f).collect()
}

/// A family together with its parameters.
///
/// Build through the checked constructors (or [`create`]) so that
/// [`DistributionSpec::generate`] only ever sees in-domain parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum DistributionSpec {
    /// `n` independent trials with success probability `p`.
    Binomial { n: u64, p: f64 },
    /// Event count with rate `lambda`.
    Poisson { lambda: f64 },
    /// Index of the first success, success probability `p`.
    Geometric { p: f64 },
    /// Successes in `draws` draws without replacement.
    Hypergeometric { population: u64, successes: u64, draws: u64 },
}

impl DistributionSpec {
    /// Checked `B(n, p)`.
    pub fn binomial(n: u64, p: f64) -> Result<Self> {
        binomial::validate(n, p)?;
        Ok(Self::Binomial { n, p })
    }

    /// Checked `Po(lambda)`.
    pub fn poisson(lambda: f64) -> Result<Self> {
        poisson::validate(lambda)?;
        Ok(Self::Poisson { lambda })
    }

    /// Checked `Ge(p)`.
    pub fn geometric(p: f64) -> Result<Self> {
        geometric::validate(p)?;
        Ok(Self::Geometric { p })
    }

    /// Checked `H(N, K, n)`.
    pub fn hypergeometric(population: u64, successes: u64, draws: u64) -> Result<Self> {
        hypergeometric::validate(population, successes, draws)?;
        Ok(Self::Hypergeometric { population, successes, draws })
    }

    /// Family tag of this spec.
    pub fn family(&self) -> Family {
        match self {
            Self::Binomial { .. } => Family::Binomial,
            Self::Poisson { .. } => Family::Poisson,
            Self::Geometric { .. } => Family::Geometric,
            Self::Hypergeometric { .. } => Family::Hypergeometric,
        }
    }

    /// Parameter names of this spec's family.
    pub fn parameter_names(&self) -> &'static [&'static str] {
        self.family().parameter_names()
    }

    /// Parameters in the positional order of [`Family::parameter_names`].
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            Self::Binomial { n, p } => vec![n as f64, p],
            Self::Poisson { lambda } => vec![lambda],
            Self::Geometric { p } => vec![p],
            Self::Hypergeometric { population, successes, draws } => {
                vec![population as f64, successes as f64, draws as f64]
            }
        }
    }

    /// Re-check the domain (specs may also arrive through deserialization).
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Binomial { n, p } => binomial::validate(n, p),
            Self::Poisson { lambda } => poisson::validate(lambda),
            Self::Geometric { p } => geometric::validate(p),
            Self::Hypergeometric { population, successes, draws } => {
                hypergeometric::validate(population, successes, draws)
            }
        }
    }

    /// Short notation, e.g. `B(n=10, p=0.500)`.
    pub fn notation(&self) -> String {
        match *self {
            Self::Binomial { n, p } => format!("B(n={}, p={:.3})", n, p),
            Self::Poisson { lambda } => format!("Po(lambda={:.3})", lambda),
            Self::Geometric { p } => format!("Ge(p={:.3})", p),
            Self::Hypergeometric { population, successes, draws } => {
                format!("H(N={}, K={}, n={})", population, successes, draws)
            }
        }
    }

    /// Raw (un-normalized) probability table.
    pub fn table(&self, policy: &TruncationPolicy) -> Result<ProbabilityTable> {
        match *self {
            Self::Binomial { n, p } => binomial::table(n, p),
            Self::Poisson { lambda } => poisson::table(lambda, policy),
            Self::Geometric { p } => geometric::table(p, policy),
            Self::Hypergeometric { population, successes, draws } => {
                hypergeometric::table(population, successes, draws)
            }
        }
    }

    /// Generate, load and normalize a variable named `X`.
    pub fn generate(&self, policy: &TruncationPolicy) -> Result<DiscreteRandomVariable> {
        let table = self.table(policy)?;
        let mut rv = DiscreteRandomVariable::new("X", self.notation());
        rv.load_distribution(table)?;
        rv.normalize()?;
        Ok(rv)
    }

    /// Theoretical mean of the untruncated distribution.
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Binomial { n, p } => n as f64 * p,
            Self::Poisson { lambda } => lambda,
            Self::Geometric { p } => 1.0 / p,
            Self::Hypergeometric { population, successes, draws } => {
                draws as f64 * successes as f64 / population as f64
            }
        }
    }

    /// Theoretical variance of the untruncated distribution.
    pub fn variance(&self) -> f64 {
        match *self {
            Self::Binomial { n, p } => n as f64 * p * (1.0 - p),
            Self::Poisson { lambda } => lambda,
            Self::Geometric { p } => (1.0 - p) / (p * p),
            Self::Hypergeometric { population, successes, draws } => {
                if population < 2 {
                    return 0.0;
                }
                let (nn, kk, n) = (population as f64, successes as f64, draws as f64);
                n * kk * (nn - kk) * (nn - n) / (nn * nn * (nn - 1.0))
            }
        }
    }
}

impl fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// Convert a positional parameter to a non-negative integer.
fn integer_parameter(family: Family, name: &'static str, value: f64) -> Result<u64> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(Error::domain(family.as_str(), name, "a non-negative integer", value));
    }
    Ok(value as u64)
}

fn build(family: Family, parameters: &[f64]) -> Result<DistributionSpec> {
    let names = family.parameter_names();
    if parameters.len() != names.len() {
        return Err(Error::ParameterCount {
            family: family.as_str(),
            expected: names.len(),
            actual: parameters.len(),
        });
    }
    match family {
        Family::Binomial => {
            let n = integer_parameter(family, "n", parameters[0])?;
            DistributionSpec::binomial(n, parameters[1])
        }
        Family::Poisson => DistributionSpec::poisson(parameters[0]),
        Family::Geometric => DistributionSpec::geometric(parameters[0]),
        Family::Hypergeometric => {
            let population = integer_parameter(family, "N", parameters[0])?;
            let successes = integer_parameter(family, "K", parameters[1])?;
            let draws = integer_parameter(family, "n", parameters[2])?;
            DistributionSpec::hypergeometric(population, successes, draws)
        }
    }
}

/// Build a checked spec from a family tag and its positional parameters.
///
/// Any failure is wrapped in [`Error::DistributionConstruction`] carrying the
/// family and the parameters as supplied.
pub fn create(family: Family, parameters: &[f64]) -> Result<DistributionSpec> {
    build(family, parameters).map_err(|source| Error::DistributionConstruction {
        family: family.as_str(),
        parameters: parameters.to_vec(),
        source: Box::new(source),
    })
}

/// Like [`create`], with the family given by name.
pub fn create_by_name(tag: &str, parameters: &[f64]) -> Result<DistributionSpec> {
    create(tag.parse()?, parameters)
}
