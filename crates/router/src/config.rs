use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};
use crate::result::ResolutionStatus;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Router tuning: signal weights and confidence thresholds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    pub weights: SignalWeights,
    pub thresholds: Thresholds,
}

/// Weight of each similarity signal in the composite score. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalWeights {
    /// TF-IDF cosine similarity against the tool description
    pub tfidf: f64,
    /// Overlap between query terms and the tool's curated keywords
    pub keyword: f64,
    /// Character-level similarity between query and description
    pub description: f64,
    /// Character-level similarity between query and tool name
    pub name: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            tfidf: 0.40,
            keyword: 0.35,
            description: 0.15,
            name: 0.10,
        }
    }
}

/// Confidence tiers applied to the winning composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// At or above: auto-resolve without confirmation
    pub resolve: f64,
    /// At or above (and below `resolve`): surface as a suggestion
    pub suggest: f64,
    /// Name-ratio cutoff for typo correction ahead of fuzzy scoring; off when unset
    pub typo_correction: Option<f64>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            resolve: 0.85,
            suggest: 0.50,
            typo_correction: None,
        }
    }
}

impl Thresholds {
    #[must_use]
    pub fn tier(&self, score: f64) -> ResolutionStatus {
        if score >= self.resolve {
            ResolutionStatus::Resolved
        } else if score >= self.suggest {
            ResolutionStatus::Suggested
        } else {
            ResolutionStatus::Unresolved
        }
    }
}

impl RouterConfig {
    /// Defaults with typo correction switched on at `ratio`
    #[must_use]
    pub fn with_typo_correction(mut self, ratio: f64) -> Self {
        self.thresholds.typo_correction = Some(ratio);
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        for (label, weight) in [
            ("weights.tfidf", w.tfidf),
            ("weights.keyword", w.keyword),
            ("weights.description", w.description),
            ("weights.name", w.name),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RouterError::invalid_config(format!(
                    "{label} must be a finite non-negative number (got {weight})"
                )));
            }
        }

        let sum = w.tfidf + w.keyword + w.description + w.name;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RouterError::invalid_config(format!(
                "weights must sum to 1.0 (got {sum})"
            )));
        }

        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.suggest) || !(0.0..=1.0).contains(&t.resolve) {
            return Err(RouterError::invalid_config(format!(
                "thresholds must lie in [0, 1] (suggest={}, resolve={})",
                t.suggest, t.resolve
            )));
        }
        if t.suggest > t.resolve {
            return Err(RouterError::invalid_config(format!(
                "thresholds.suggest ({}) cannot exceed thresholds.resolve ({})",
                t.suggest, t.resolve
            )));
        }
        if let Some(ratio) = t.typo_correction {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(RouterError::invalid_config(format!(
                    "thresholds.typo_correction must lie in (0, 1] (got {ratio})"
                )));
            }
            // Typo hits are reported as resolved, so they must clear the resolve tier.
            if ratio < t.resolve {
                return Err(RouterError::invalid_config(format!(
                    "thresholds.typo_correction ({ratio}) cannot be below thresholds.resolve ({})",
                    t.resolve
                )));
            }
        }

        Ok(())
    }
}
