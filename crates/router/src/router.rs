use std::collections::BTreeMap;

use intent_catalog::{Catalog, ToolEntry};

use crate::aliases::AliasTables;
use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::params::normalize_parameters;
use crate::result::{MatchMethod, Resolution, ToolMatch};
use crate::scorer::{PreparedQuery, Scorer};
use crate::similarity::sequence_ratio;
use crate::tfidf::TfIdfIndex;
use crate::tokenizer::name_key;

/// Resolves free-text intents to catalog tools.
///
/// All derived state (index, alias tables, tool profiles) is built in the
/// constructor and only read afterwards, so a `Router` can be shared across
/// threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Router {
    catalog: Catalog,
    scorer: Scorer,
    aliases: AliasTables,
    config: RouterConfig,
}

impl Router {
    pub fn new(catalog: Catalog) -> Result<Self> {
        Self::with_config(catalog, RouterConfig::default())
    }

    pub fn with_config(catalog: Catalog, config: RouterConfig) -> Result<Self> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(RouterError::EmptyCatalog);
        }

        let scorer = Scorer::build(&catalog)?;
        let aliases = AliasTables::build(&catalog)?;

        log::debug!(
            "Router ready: {} tools, {} tool aliases, {} parameter aliases",
            catalog.len(),
            aliases.tool_alias_count(),
            aliases.parameter_alias_count()
        );

        Ok(Self {
            catalog,
            scorer,
            aliases,
            config,
        })
    }

    /// Route `query` to a tool.
    ///
    /// Stages, first hit wins: exact name, alias, typo correction (when
    /// configured), weighted fuzzy scoring with confidence tiers.
    #[must_use]
    pub fn resolve(&self, query: &str) -> Resolution {
        let key = name_key(query);

        if let Some(tool) = self.exact_match(&key) {
            log::debug!("Resolved {query:?} by exact name: {}", tool.name);
            return Resolution::matched(&tool.name, MatchMethod::Exact, 1.0);
        }

        if let Some(tool) = self.aliases.resolve_tool_alias(query) {
            log::debug!("Resolved {query:?} by alias: {tool}");
            return Resolution::matched(tool, MatchMethod::Alias, 1.0);
        }

        if let Some((tool, ratio)) = self.typo_correction(&key) {
            log::debug!("Resolved {query:?} by typo correction: {tool} ({ratio:.3})");
            return Resolution::matched(tool, MatchMethod::Typo, ratio);
        }

        let prepared = self.scorer.prepare(query);
        let (best, score) = self.best_candidate(&prepared);
        let status = self.config.thresholds.tier(score);
        let tool = &self.catalog.tools()[best].name;

        log::debug!("Fuzzy match for {query:?}: {tool} ({score:.3}) -> {status:?}");
        Resolution::ranked(tool, status, score)
    }

    /// [`Router::resolve`] plus canonicalized parameter names.
    ///
    /// Fails only when two supplied names normalize to the same canonical name.
    pub fn resolve_with_parameters(
        &self,
        query: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<Resolution> {
        let normalized = self.normalize_parameters(parameters)?;
        let resolution = self.resolve(query);
        if parameters.is_empty() {
            return Ok(resolution);
        }
        Ok(resolution.with_parameters(normalized))
    }

    pub fn normalize_parameters(
        &self,
        parameters: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>> {
        normalize_parameters(&self.aliases, parameters)
    }

    /// Ranked candidates for `query`, best first, at most `top_k`.
    ///
    /// The tool [`Router::resolve`] would pick before fuzzy scoring (exact,
    /// alias or typo hit) is pinned first with its resolution confidence; the
    /// rest are ordered by composite score with ties in catalog order.
    #[must_use]
    pub fn analyze(&self, query: &str, top_k: usize) -> Vec<ToolMatch> {
        if top_k == 0 {
            return Vec::new();
        }

        let prepared = self.scorer.prepare(query);
        let pinned = self.pinned_position(query, prepared.key());
        let weights = &self.config.weights;

        let mut matches: Vec<ToolMatch> = self
            .scorer
            .score_all(&prepared)
            .into_iter()
            .zip(self.catalog.tools())
            .enumerate()
            .map(|(position, (signals, tool))| ToolMatch {
                tool: tool.name.clone(),
                score: match pinned {
                    Some((pinned_position, confidence)) if pinned_position == position => {
                        confidence
                    }
                    _ => signals.composite(weights),
                },
                signals,
            })
            .collect();

        let pinned_match = pinned.map(|(position, _)| matches.remove(position));
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if let Some(top) = pinned_match {
            matches.insert(0, top);
        }
        matches.truncate(top_k);
        matches
    }

    /// Catalog tools in catalog order, for discovery listings
    #[must_use]
    pub fn list_tools(&self) -> &[ToolEntry] {
        self.catalog.tools()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    #[must_use]
    pub fn aliases(&self) -> &AliasTables {
        &self.aliases
    }

    #[must_use]
    pub fn index(&self) -> &TfIdfIndex {
        self.scorer.index()
    }

    fn exact_position(&self, key: &str) -> Option<usize> {
        if key.is_empty() {
            return None;
        }
        (0..self.scorer.len()).find(|&position| self.scorer.name_key(position) == Some(key))
    }

    fn exact_match(&self, key: &str) -> Option<&ToolEntry> {
        self.exact_position(key)
            .and_then(|position| self.catalog.tools().get(position))
    }

    fn pinned_position(&self, query: &str, key: &str) -> Option<(usize, f64)> {
        if let Some(position) = self.exact_position(key) {
            return Some((position, 1.0));
        }
        if let Some(tool) = self.aliases.resolve_tool_alias(query) {
            return self.position_of(tool).map(|position| (position, 1.0));
        }
        let (tool, ratio) = self.typo_correction(key)?;
        self.position_of(tool).map(|position| (position, ratio))
    }

    fn position_of(&self, tool: &str) -> Option<usize> {
        self.catalog.tools().iter().position(|entry| entry.name == tool)
    }

    /// Typo candidate that clears the configured cutoff; `None` when disabled.
    fn typo_correction(&self, key: &str) -> Option<(&str, f64)> {
        let cutoff = self.config.thresholds.typo_correction?;
        self.typo_candidate(key).filter(|&(_, ratio)| ratio >= cutoff)
    }

    /// Closest tool by name ratio against tool names and alias keys.
    fn typo_candidate(&self, key: &str) -> Option<(&str, f64)> {
        if key.is_empty() {
            return None;
        }

        let names = self
            .catalog
            .tools()
            .iter()
            .enumerate()
            .filter_map(|(position, tool)| {
                self.scorer
                    .name_key(position)
                    .map(|tool_key| (tool.name.as_str(), sequence_ratio(key, tool_key)))
            });
        let aliases = self
            .aliases
            .tool_aliases()
            .map(|(alias_key, tool)| (tool, sequence_ratio(key, alias_key)));

        names.chain(aliases).fold(None, |best, (tool, ratio)| match best {
            Some((_, best_ratio)) if best_ratio >= ratio => best,
            _ => Some((tool, ratio)),
        })
    }

    /// Highest composite score; the earliest tool wins ties.
    fn best_candidate(&self, query: &PreparedQuery) -> (usize, f64) {
        let weights = &self.config.weights;
        let mut best = (0, f64::NEG_INFINITY);

        for (position, signals) in self.scorer.score_all(query).into_iter().enumerate() {
            let score = signals.composite(weights);
            log::trace!(
                "  {}: {score:.4} (tfidf={:.3} keyword={:.3} description={:.3} name={:.3})",
                self.catalog.tools()[position].name,
                signals.tfidf,
                signals.keyword,
                signals.description,
                signals.name
            );
            if score > best.1 {
                best = (position, score);
            }
        }

        best
    }
}
