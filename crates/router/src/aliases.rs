use std::collections::BTreeMap;

use intent_catalog::Catalog;

use crate::error::{Result, RouterError};
use crate::tokenizer::name_key;

/// Exact-match synonym tables for tool and parameter names.
///
/// Keys are stored as [`name_key`]s, so lookups ignore case and separator
/// style the same way exact tool matching does.
#[derive(Debug, Clone, Default)]
pub struct AliasTables {
    tools: BTreeMap<String, String>,
    parameters: BTreeMap<String, String>,
}

impl AliasTables {
    pub fn build(catalog: &Catalog) -> Result<Self> {
        let mut tool_keys: BTreeMap<String, &str> = BTreeMap::new();
        for tool in catalog.tools() {
            let key = name_key(&tool.name);
            if let Some(&first) = tool_keys.get(&key) {
                return Err(RouterError::ToolKeyConflict {
                    key,
                    first: first.to_string(),
                    second: tool.name.clone(),
                });
            }
            tool_keys.insert(key, tool.name.as_str());
        }

        let mut tools = BTreeMap::new();
        for (alias, target) in catalog.tool_aliases() {
            let Some(&canonical) = tool_keys.get(&name_key(target)) else {
                return Err(RouterError::UnknownAliasTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            };

            let key = name_key(alias);
            if key.is_empty() {
                log::warn!("Ignoring tool alias {alias:?}: no word characters");
                continue;
            }
            if let Some(&shadowed) = tool_keys.get(&key) {
                if shadowed != canonical {
                    return Err(RouterError::AliasShadowsTool {
                        alias: alias.clone(),
                        tool: shadowed.to_string(),
                        target: canonical.to_string(),
                    });
                }
                // A tool aliased to itself adds nothing over exact matching.
                continue;
            }
            insert_alias(&mut tools, key, canonical)?;
        }

        let mut parameters = BTreeMap::new();
        for (alias, canonical) in catalog.parameter_aliases() {
            let key = name_key(alias);
            if key.is_empty() {
                log::warn!("Ignoring parameter alias {alias:?}: no word characters");
                continue;
            }
            insert_alias(&mut parameters, key, canonical)?;
        }

        Ok(Self { tools, parameters })
    }

    /// Canonical tool name for `name`, if it is a registered alias
    #[must_use]
    pub fn resolve_tool_alias(&self, name: &str) -> Option<&str> {
        self.tools.get(&name_key(name)).map(String::as_str)
    }

    /// Canonical parameter name for `name`; unknown names pass through verbatim
    #[must_use]
    pub fn resolve_parameter_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.parameters
            .get(&name_key(name))
            .map_or(name, String::as_str)
    }

    /// Normalized tool-alias keys with their canonical targets
    pub fn tool_aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tools.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn tool_alias_count(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn parameter_alias_count(&self) -> usize {
        self.parameters.len()
    }
}

fn insert_alias(table: &mut BTreeMap<String, String>, key: String, canonical: &str) -> Result<()> {
    match table.get(&key) {
        Some(existing) if existing != canonical => Err(RouterError::AliasConflict {
            alias: key,
            first: existing.clone(),
            second: canonical.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            table.insert(key, canonical.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intent_catalog::ToolEntry;

    fn catalog() -> Catalog {
        Catalog::from_tools(vec![
            ToolEntry::new("skeleton", "Extract code structure"),
            ToolEntry::new("apply_patch", "Apply a diff"),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_tool_aliases_case_and_separator_insensitively() {
        let tables = AliasTables::build(
            &catalog().with_tool_aliases([("Code-Outline", "skeleton"), ("patch", "apply_patch")]),
        )
        .unwrap();

        assert_eq!(tables.resolve_tool_alias("code outline"), Some("skeleton"));
        assert_eq!(tables.resolve_tool_alias("CODE_OUTLINE"), Some("skeleton"));
        assert_eq!(tables.resolve_tool_alias("patch"), Some("apply_patch"));
        assert_eq!(tables.resolve_tool_alias("deps"), None);
    }

    #[test]
    fn alias_target_spelling_is_canonicalized() {
        let tables =
            AliasTables::build(&catalog().with_tool_aliases([("fix", "Apply-Patch")])).unwrap();
        assert_eq!(tables.resolve_tool_alias("fix"), Some("apply_patch"));
    }

    #[test]
    fn unknown_parameters_pass_through_verbatim() {
        let tables = AliasTables::build(
            &catalog().with_parameter_aliases([("path", "file_path"), ("sym", "symbol")]),
        )
        .unwrap();

        assert_eq!(tables.resolve_parameter_alias("path"), "file_path");
        assert_eq!(tables.resolve_parameter_alias("Path"), "file_path");
        assert_eq!(tables.resolve_parameter_alias("file_path"), "file_path");
        assert_eq!(tables.resolve_parameter_alias("Depth-Limit"), "Depth-Limit");
    }

    #[test]
    fn alias_must_not_shadow_another_tool() {
        let err = AliasTables::build(&catalog().with_tool_aliases([("Skeleton", "apply_patch")]))
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::AliasShadowsTool { ref tool, ref target, .. }
                if tool == "skeleton" && target == "apply_patch"
        ));
    }

    #[test]
    fn self_alias_is_dropped() {
        let tables =
            AliasTables::build(&catalog().with_tool_aliases([("skeleton", "skeleton")])).unwrap();
        assert_eq!(tables.tool_alias_count(), 0);
    }

    #[test]
    fn alias_to_missing_tool_is_rejected() {
        let err =
            AliasTables::build(&catalog().with_tool_aliases([("graph", "deps")])).unwrap_err();
        assert!(matches!(
            err,
            RouterError::UnknownAliasTarget { ref target, .. } if target == "deps"
        ));
    }

    #[test]
    fn aliases_colliding_after_normalization_are_rejected() {
        let err = AliasTables::build(
            &catalog().with_tool_aliases([("code-view", "skeleton"), ("code_view", "apply_patch")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RouterError::AliasConflict { ref alias, .. } if alias == "code_view"
        ));
    }

    #[test]
    fn tools_sharing_a_name_key_are_rejected() {
        let catalog = Catalog::from_tools(vec![
            ToolEntry::new("apply_patch", "Apply a diff"),
            ToolEntry::new("Apply-Patch", "Apply a diff again"),
        ])
        .unwrap();

        let err = AliasTables::build(&catalog).unwrap_err();
        match err {
            RouterError::ToolKeyConflict { key, first, second } => {
                assert_eq!(key, "apply_patch");
                assert_eq!(first, "apply_patch");
                assert_eq!(second, "Apply-Patch");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
