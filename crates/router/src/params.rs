use std::collections::BTreeMap;

use crate::aliases::AliasTables;
use crate::error::{Result, RouterError};

/// Rewrite parameter names to their canonical spelling.
///
/// Names without an alias are kept verbatim. Two raw names landing on the
/// same canonical name is a [`RouterError::ParameterConflict`]; raw names are
/// visited in sorted order, so the reported pair is stable.
pub fn normalize_parameters(
    aliases: &AliasTables,
    raw: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>> {
    let mut normalized = BTreeMap::new();
    let mut origin: BTreeMap<&str, &str> = BTreeMap::new();

    for (name, value) in raw {
        let canonical = aliases.resolve_parameter_alias(name);
        if let Some(first) = origin.insert(canonical, name) {
            return Err(RouterError::ParameterConflict {
                canonical: canonical.to_string(),
                first: first.to_string(),
                second: name.clone(),
            });
        }
        normalized.insert(canonical.to_string(), value.clone());
    }

    Ok(normalized)
}
