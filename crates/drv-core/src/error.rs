//! Error types for drvstat

use thiserror::Error;

/// drvstat error type
#[derive(Error, Debug)]
pub enum Error {
    /// A distribution family received a parameter outside its valid domain.
    #[error("{family}: parameter {parameter} must satisfy {constraint}, got {value}")]
    ParameterDomain {
        /// Family whose constructor rejected the value
        family: &'static str,
        /// Parameter name as it appears in the family notation
        parameter: &'static str,
        /// Violated constraint, human readable (e.g. `0 <= p <= 1`)
        constraint: &'static str,
        /// Offending value, formatted
        value: String,
    },

    /// Wrong number of parameters handed to the factory.
    #[error("{family} expects {expected} parameter(s), got {actual}")]
    ParameterCount {
        /// Family tag
        family: &'static str,
        /// Arity of the family
        expected: usize,
        /// Number of parameters supplied
        actual: usize,
    },

    /// A table was loaded from empty input.
    #[error("probability table input is empty")]
    EmptyInput,

    /// An operation needed a non-empty support.
    #[error("probability table has an empty support")]
    EmptySupport,

    /// Normalization on a table whose total mass is not positive.
    #[error("cannot normalize: total probability must be > 0, got {sum}")]
    DegenerateSum {
        /// Total probability found
        sum: f64,
    },

    /// Validation found a probability outside `[0, 1]`.
    #[error("P(X={x}) = {probability} lies outside [0, 1]")]
    ProbabilityRange {
        /// Support value
        x: i64,
        /// Offending probability
        probability: f64,
    },

    /// Validation found the total probability away from 1.
    #[error("probabilities sum to {sum:.6}, expected 1 (table is not normalized)")]
    NotNormalized {
        /// Total probability found
        sum: f64,
    },

    /// Unknown family tag.
    #[error("unsupported distribution family: {0}")]
    UnsupportedFamily(String),

    /// The factory failed to build a family from its parameters.
    #[error("failed to construct {family} with parameters {parameters:?}: {source}")]
    DistributionConstruction {
        /// Family tag
        family: &'static str,
        /// Parameters as supplied
        parameters: Vec<f64>,
        /// Underlying cause
        #[source]
        source: Box<Error>,
    },

    /// Interchange document rejected.
    #[error("import format error: {0}")]
    ImportFormat(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::ParameterDomain`] from any displayable value.
    pub fn domain(
        family: &'static str,
        parameter: &'static str,
        constraint: &'static str,
        value: impl std::fmt::Display,
    ) -> Self {
        Self::ParameterDomain { family, parameter, constraint, value: value.to_string() }
    }

    /// Innermost cause, unwrapping [`Error::DistributionConstruction`] layers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::DistributionConstruction { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
