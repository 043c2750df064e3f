//! End-to-end pipeline: spec → variable → summary → alternatives.

use std::time::Instant;

use drv_core::{Result, StatisticalSummary};
use serde::Serialize;

use crate::alternative::suggest_alternatives;
use crate::cache::{ResultCache, fingerprint};
use crate::family::DistributionSpec;
use crate::interchange::ProbabilityDocument;
use crate::stats;
use crate::truncation::TruncationPolicy;
use crate::variable::DiscreteRandomVariable;

/// A generated (or imported) variable with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub variable: DiscreteRandomVariable,
    pub summary: StatisticalSummary,
    pub alternatives: Vec<DistributionSpec>,
}

/// Serializable view of an [`Analysis`].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub document: ProbabilityDocument,
    pub summary: StatisticalSummary,
    pub alternatives: Vec<AlternativeEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlternativeEntry {
    pub notation: String,
    #[serde(flatten)]
    pub spec: DistributionSpec,
}

impl Analysis {
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            document: ProbabilityDocument::from_variable(&self.variable),
            summary: self.summary.clone(),
            alternatives: self
                .alternatives
                .iter()
                .map(|spec| AlternativeEntry { notation: spec.notation(), spec: *spec })
                .collect(),
        }
    }
}

/// Summarize an existing variable.
pub fn analyze_variable(variable: DiscreteRandomVariable) -> Result<Analysis> {
    let summary = stats::calculate(&variable)?;
    let alternatives = suggest_alternatives(&summary);
    Ok(Analysis { variable, summary, alternatives })
}

/// Generate the family's variable and summarize it.
pub fn analyze(spec: &DistributionSpec, policy: &TruncationPolicy) -> Result<Analysis> {
    spec.validate()?;
    let variable = spec.generate(policy)?;
    log::debug!("{}: {} support values", spec, variable.support_size());
    analyze_variable(variable)
}

#[derive(Serialize)]
struct AnalysisRequest<'a> {
    spec: &'a DistributionSpec,
    policy: &'a TruncationPolicy,
}

/// [`analyze`] through a caller-owned cache keyed on `(spec, policy)`.
pub fn analyze_cached(
    spec: &DistributionSpec,
    policy: &TruncationPolicy,
    cache: &mut ResultCache<Analysis>,
    now: Instant,
) -> Result<Analysis> {
    let key = fingerprint(&AnalysisRequest { spec, policy })?;
    cache.get_or_try_insert_with_at(&key, now, || analyze(spec, policy))
}
