//! Discrete probability distributions as explicit probability tables.
//!
//! A [`DiscreteRandomVariable`] is a finite `value -> probability` table. The
//! parametric families (binomial, Poisson, geometric, hypergeometric) generate
//! such tables, truncating infinite supports according to a
//! [`TruncationPolicy`]; [`stats::calculate`] turns a validated table into a
//! [`StatisticalSummary`](drv_core::StatisticalSummary).
//!
//! ```
//! use drv_prob::{DistributionSpec, TruncationPolicy, stats};
//!
//! let rv = DistributionSpec::binomial(10, 0.5)?.generate(&TruncationPolicy::default())?;
//! let summary = stats::calculate(&rv)?;
//! assert_eq!(summary.mode, 5);
//! # Ok::<(), drv_core::Error>(())
//! ```

pub mod alternative;
pub mod analysis;
pub mod binomial;
pub mod cache;
pub mod family;
pub mod geometric;
pub mod hypergeometric;
pub mod interchange;
pub mod math;
pub mod poisson;
pub mod series;
pub mod stats;
pub mod truncation;
pub mod variable;

pub use analysis::{Analysis, analyze, analyze_cached, analyze_variable};
pub use cache::ResultCache;
pub use family::{DistributionSpec, Family, available_families, create, create_by_name};
pub use interchange::{ProbabilityDocument, export_json, import_json};
pub use truncation::TruncationPolicy;
pub use variable::{DiscreteRandomVariable, ProbabilityTable};
