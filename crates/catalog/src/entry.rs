use serde::{Deserialize, Serialize};

/// Static metadata for one routable tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolEntry {
    /// Unique identifier
    pub name: String,

    /// Free-text sentence used for similarity scoring
    #[serde(default)]
    pub description: String,

    /// Curated synonyms and related terms
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Canonical parameter names, in declaration order
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl ToolEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            keywords: Vec::new(),
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `parameter` is one of this tool's canonical parameter names
    #[must_use]
    pub fn accepts(&self, parameter: &str) -> bool {
        self.parameters.iter().any(|p| p == parameter)
    }
}

/// Capability interface for pluggable tool providers.
///
/// Providers describe themselves; the catalog only keeps the extracted data.
pub trait ToolDescriptor {
    fn describe(&self) -> ToolEntry;
}

impl ToolDescriptor for ToolEntry {
    fn describe(&self) -> ToolEntry {
        self.clone()
    }
}
