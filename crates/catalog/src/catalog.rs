use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entry::{ToolDescriptor, ToolEntry};
use crate::error::{CatalogError, Result};

pub const CATALOG_SCHEMA_VERSION: u32 = 1;

/// Immutable set of routable tools plus the alias data that accompanies them.
///
/// Tool order is significant: it is the tie-break order used when two tools
/// score identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub(crate) tools: Vec<ToolEntry>,
    pub(crate) tool_aliases: BTreeMap<String, String>,
    pub(crate) parameter_aliases: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    schema_version: Option<u32>,
    #[serde(default)]
    tools: Vec<ToolEntry>,
    #[serde(default)]
    tool_aliases: BTreeMap<String, String>,
    #[serde(default)]
    parameter_aliases: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new(
        tools: Vec<ToolEntry>,
        tool_aliases: BTreeMap<String, String>,
        parameter_aliases: BTreeMap<String, String>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            if tool.name.trim().is_empty() {
                return Err(CatalogError::EmptyToolName);
            }
            if !seen.insert(tool.name.as_str()) {
                return Err(CatalogError::DuplicateTool(tool.name.clone()));
            }
        }

        Ok(Self {
            tools,
            tool_aliases,
            parameter_aliases,
        })
    }

    /// Catalog without any alias data
    pub fn from_tools(tools: Vec<ToolEntry>) -> Result<Self> {
        Self::new(tools, BTreeMap::new(), BTreeMap::new())
    }

    /// Collect entries from tool providers, in iteration order
    pub fn from_descriptors<'a, I>(providers: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a dyn ToolDescriptor>,
    {
        Self::from_tools(providers.into_iter().map(|p| p.describe()).collect())
    }

    #[must_use]
    pub fn with_tool_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tool_aliases
            .extend(aliases.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn with_parameter_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.parameter_aliases
            .extend(aliases.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(raw)?;
        if let Some(version) = raw.schema_version {
            if version != CATALOG_SCHEMA_VERSION {
                return Err(CatalogError::UnsupportedSchema(version));
            }
        }
        Self::new(raw.tools, raw.tool_aliases, raw.parameter_aliases)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    #[must_use]
    pub fn tools(&self) -> &[ToolEntry] {
        &self.tools
    }

    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&ToolEntry> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    #[must_use]
    pub fn tool_aliases(&self) -> &BTreeMap<String, String> {
        &self.tool_aliases
    }

    #[must_use]
    pub fn parameter_aliases(&self) -> &BTreeMap<String, String> {
        &self.parameter_aliases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let err = Catalog::from_tools(vec![
            ToolEntry::new("deps", "Show dependency graph"),
            ToolEntry::new("deps", "Something else"),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTool(name) if name == "deps"));
    }

    #[test]
    fn rejects_blank_names() {
        let err = Catalog::from_tools(vec![ToolEntry::new("  ", "blank")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyToolName));
    }

    #[test]
    fn empty_catalog_is_a_valid_value() {
        let catalog = Catalog::from_tools(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn rejects_unknown_schema_version() {
        let err = Catalog::from_toml_str("schema_version = 2").unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedSchema(2)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Catalog::from_toml_str("toolz = []").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    struct Cfg;

    impl ToolDescriptor for Cfg {
        fn describe(&self) -> ToolEntry {
            ToolEntry::new("cfg", "Build a control flow graph").parameters(["file_path"])
        }
    }

    #[test]
    fn collects_from_descriptors_in_order() {
        let grep = ToolEntry::new("grep", "Search file contents");
        let providers: Vec<&dyn ToolDescriptor> = vec![&Cfg, &grep];
        let catalog = Catalog::from_descriptors(providers).unwrap();

        let names: Vec<&str> = catalog.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["cfg", "grep"]);
        assert_eq!(catalog.tool("cfg").unwrap().parameters, vec!["file_path"]);
    }
}
