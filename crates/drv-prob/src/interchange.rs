//! JSON interchange document for probability tables.
//!
//! ```json
//! { "name": "X", "description": "...", "distribution": { "0": 0.25, "1": 0.75 } }
//! ```
//!
//! Keys are string-encoded integers. Capitalized field names (`Name`,
//! `Description`, `Distribution`) are accepted on import.

use std::collections::BTreeMap;

use drv_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::variable::{DiscreteRandomVariable, ProbabilityTable, VALIDATION_TOLERANCE};

/// Serialized form of a [`DiscreteRandomVariable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityDocument {
    #[serde(alias = "Name", default = "default_name")]
    pub name: String,
    #[serde(alias = "Description", default)]
    pub description: String,
    #[serde(alias = "Distribution")]
    pub distribution: BTreeMap<String, f64>,
}

fn default_name() -> String {
    "X".to_string()
}

impl ProbabilityDocument {
    /// Snapshot of a variable.
    pub fn from_variable(rv: &DiscreteRandomVariable) -> Self {
        Self {
            name: rv.name().to_string(),
            description: rv.description().to_string(),
            distribution: rv.distribution().iter().map(|(x, p)| (x.to_string(), *p)).collect(),
        }
    }

    /// Decode the keys and probabilities into a table.
    pub fn to_table(&self) -> Result<ProbabilityTable> {
        if self.distribution.is_empty() {
            return Err(Error::ImportFormat("distribution is empty".to_string()));
        }
        let mut table = ProbabilityTable::new();
        for (key, &p) in &self.distribution {
            let x: i64 = key.trim().parse().map_err(|_| {
                Error::ImportFormat(format!("key {:?} is not an integer", key))
            })?;
            if !p.is_finite() {
                return Err(Error::ImportFormat(format!("P(X={}) is not a finite number", x)));
            }
            if table.insert(x, p).is_some() {
                return Err(Error::ImportFormat(format!("value {} appears more than once", x)));
            }
        }
        Ok(table)
    }

    /// Rebuild the variable, normalizing when the total is off by more than
    /// the validation tolerance.
    pub fn into_variable(self) -> Result<DiscreteRandomVariable> {
        let table = self.to_table()?;
        let mut rv = DiscreteRandomVariable::new(self.name, self.description);
        rv.load_distribution(table)?;
        if (rv.total() - 1.0).abs() > VALIDATION_TOLERANCE {
            log::debug!("imported table sums to {}, normalizing", rv.total());
            rv.normalize()?;
        }
        Ok(rv)
    }
}

/// Parse a document and rebuild its variable.
pub fn import_json(text: &str) -> Result<DiscreteRandomVariable> {
    let doc: ProbabilityDocument =
        serde_json::from_str(text).map_err(|e| Error::ImportFormat(e.to_string()))?;
    doc.into_variable()
}

/// Pretty-printed document for a variable.
pub fn export_json(rv: &DiscreteRandomVariable) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ProbabilityDocument::from_variable(rv))?)
}
