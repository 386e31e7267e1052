//! Human-readable rendering of listings and resolution outcomes.

use std::fmt;

use intent_catalog::ToolEntry;

use crate::result::{MatchMethod, Resolution, ResolutionStatus, ToolMatch};

/// Compact one-line-per-tool listing: `name(param, param): description`.
#[must_use]
pub fn format_tool_list(tools: &[ToolEntry]) -> String {
    let mut out = String::new();
    for tool in tools {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&tool.name);
        out.push('(');
        out.push_str(&tool.parameters.join(", "));
        out.push(')');
        if !tool.description.is_empty() {
            out.push_str(": ");
            out.push_str(&tool.description);
        }
    }
    out
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolved => "resolved",
            Self::Suggested => "suggested",
            Self::Unresolved => "unresolved",
        })
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Alias => "alias",
            Self::Typo => "typo",
            Self::Fuzzy => "fuzzy",
        })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.tool.as_deref()) {
            (ResolutionStatus::Resolved, Some(tool)) => {
                write!(f, "{tool} ({}, {:.2})", self.method, self.confidence)
            }
            (ResolutionStatus::Suggested, Some(tool)) => {
                write!(f, "did you mean `{tool}`? ({:.2})", self.confidence)
            }
            _ => write!(f, "no matching tool (best {:.2})", self.confidence),
        }
    }
}

impl fmt::Display for ToolMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.tool, self.score)
    }
}
