//! Analyzer configuration file (YAML or JSON).
//!
//! ```yaml
//! truncation:
//!   tail_threshold: 1.0e-12
//!   max_terms: 5000
//! cache_ttl_secs: 60
//! ```

use anyhow::{Context, Result};
use drv_prob::TruncationPolicy;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub truncation: TruncationPolicy,
    pub cache_ttl_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { truncation: TruncationPolicy::default(), cache_ttl_secs: DEFAULT_CACHE_TTL_SECS }
    }
}

impl AnalyzerConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

pub fn parse_config(text: &str) -> Result<AnalyzerConfig> {
    // YAML parser also reads JSON.
    let cfg: AnalyzerConfig = if text.trim().is_empty() {
        AnalyzerConfig::default()
    } else {
        serde_yaml_ng::from_str(text)?
    };
    cfg.truncation.validate()?;
    Ok(cfg)
}

/// Load the config at `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    let Some(path) = path else {
        return Ok(AnalyzerConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg =
        parse_config(&text).with_context(|| format!("invalid config {}", path.display()))?;
    tracing::info!(
        tail_threshold = cfg.truncation.tail_threshold,
        max_terms = cfg.truncation.max_terms,
        cache_ttl_secs = cfg.cache_ttl_secs,
        "config loaded"
    );
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, AnalyzerConfig::default());
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(300));
        assert_eq!(load_config(None).unwrap(), AnalyzerConfig::default());
    }

    #[test]
    fn test_yaml_partial() {
        let cfg = parse_config("truncation:\n  max_terms: 500\n").unwrap();
        assert_eq!(cfg.truncation.max_terms, 500);
        assert_eq!(cfg.truncation.tail_threshold, TruncationPolicy::default().tail_threshold);
        assert_eq!(cfg.cache_ttl_secs, 300);
    }

    #[test]
    fn test_json_is_accepted() {
        let cfg = parse_config(r#"{"cache_ttl_secs": 5, "truncation": {"tail_threshold": 1e-9}}"#)
            .unwrap();
        assert_eq!(cfg.cache_ttl_secs, 5);
        assert_eq!(cfg.truncation.tail_threshold, 1e-9);
    }

    #[test]
    fn test_rejects_unknown_and_invalid() {
        assert!(parse_config("cache_ttl: 5\n").is_err());
        assert!(parse_config("truncation:\n  max_terms: 0\n").is_err());
        assert!(parse_config("truncation:\n  tail_threshold: -1.0\n").is_err());
    }
}
