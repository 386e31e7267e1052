use std::collections::BTreeMap;

use serde::Serialize;

use crate::scorer::SignalScores;

/// Confidence tier of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    /// Safe to act on without confirmation
    Resolved,
    /// Plausible; the caller must confirm ("did you mean ...?")
    Suggested,
    /// No tool is confidently identifiable
    Unresolved,
}

/// Which stage produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Exact,
    Alias,
    Typo,
    Fuzzy,
}

/// Outcome of routing one query. Built fresh per call and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub status: ResolutionStatus,
    /// Canonical tool name; `None` when unresolved
    pub tool: Option<String>,
    /// Score in `[0, 1]`; exact and alias matches are `1.0`
    pub confidence: f64,
    pub method: MatchMethod,
    /// Canonical parameter name → raw value, present only when parameters were supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_parameters: Option<BTreeMap<String, String>>,
}

impl Resolution {
    pub(crate) fn matched(tool: &str, method: MatchMethod, confidence: f64) -> Self {
        Self {
            status: ResolutionStatus::Resolved,
            tool: Some(tool.to_string()),
            confidence,
            method,
            normalized_parameters: None,
        }
    }

    pub(crate) fn ranked(tool: &str, status: ResolutionStatus, confidence: f64) -> Self {
        let tool = match status {
            ResolutionStatus::Unresolved => None,
            _ => Some(tool.to_string()),
        };
        Self {
            status,
            tool,
            confidence,
            method: MatchMethod::Fuzzy,
            normalized_parameters: None,
        }
    }

    pub(crate) fn with_parameters(mut self, parameters: BTreeMap<String, String>) -> Self {
        self.normalized_parameters = Some(parameters);
        self
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == ResolutionStatus::Resolved
    }

    /// Tool to act on without asking the user
    #[must_use]
    pub fn actionable_tool(&self) -> Option<&str> {
        if self.is_resolved() {
            self.tool.as_deref()
        } else {
            None
        }
    }
}

/// One ranked candidate from intent analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolMatch {
    pub tool: String,
    pub score: f64,
    pub signals: SignalScores,
}
