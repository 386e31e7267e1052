use std::collections::BTreeSet;

use intent_catalog::Catalog;
use serde::Serialize;

use crate::config::SignalWeights;
use crate::error::Result;
use crate::similarity::sequence_ratio;
use crate::tfidf::{SparseVector, TfIdfIndex};
use crate::tokenizer::{fold_plural, name_key, words};

/// Query words ignored when matching against curated keywords, unless some
/// tool lists the word as a keyword itself.
const STOPWORDS: &[&str] = &[
    // English function words.
    "a", "about", "all", "an", "and", "any", "are", "as", "at", "be", "by", "can", "could",
    "do", "does", "for", "from", "have", "how", "i", "in", "into", "is", "it", "its", "me",
    "my", "of", "on", "or", "please", "some", "that", "the", "their", "there", "these",
    "this", "those", "to", "us", "was", "we", "what", "when", "where", "which", "who", "why",
    "will", "with", "would", "you", "your",
    // Request noise.
    "find", "get", "give", "show", "want", "need", "let",
];

/// Per-signal similarity of one query against one tool, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SignalScores {
    pub tfidf: f64,
    pub keyword: f64,
    pub description: f64,
    pub name: f64,
}

impl SignalScores {
    /// Weighted sum, accumulated in a fixed order.
    #[must_use]
    pub fn composite(&self, weights: &SignalWeights) -> f64 {
        let sum = weights.tfidf * self.tfidf
            + weights.keyword * self.keyword
            + weights.description * self.description
            + weights.name * self.name;
        sum.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
struct ToolProfile {
    name_key: String,
    description: String,
    keyword_terms: BTreeSet<String>,
}

/// Query text digested once and compared against every tool.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    text: String,
    key: String,
    words: Vec<String>,
    terms: BTreeSet<String>,
    vector: SparseVector,
}

impl PreparedQuery {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Computes the four similarity signals for every catalog tool.
///
/// Built once from a catalog; read-only afterwards.
#[derive(Debug, Clone)]
pub struct Scorer {
    index: TfIdfIndex,
    profiles: Vec<ToolProfile>,
    keyword_vocabulary: BTreeSet<String>,
}

impl Scorer {
    pub fn build(catalog: &Catalog) -> Result<Self> {
        let descriptions = catalog.tools().iter().map(|tool| tool.description.as_str());
        let index = TfIdfIndex::build(descriptions)?;
        let profiles: Vec<ToolProfile> = catalog
            .tools()
            .iter()
            .map(|tool| ToolProfile {
                name_key: name_key(&tool.name),
                description: tool.description.trim().to_lowercase(),
                keyword_terms: tool
                    .keywords
                    .iter()
                    .flat_map(|keyword| keyword_terms(keyword))
                    .collect(),
            })
            .collect();
        let keyword_vocabulary = profiles
            .iter()
            .flat_map(|profile| profile.keyword_terms.iter().cloned())
            .collect();

        Ok(Self {
            index,
            profiles,
            keyword_vocabulary,
        })
    }

    #[must_use]
    pub fn index(&self) -> &TfIdfIndex {
        &self.index
    }

    #[must_use]
    pub fn prepare(&self, query: &str) -> PreparedQuery {
        let query_words = words(query);
        PreparedQuery {
            text: query.trim().to_lowercase(),
            key: query_words.join("_"),
            terms: query_terms(query, &self.keyword_vocabulary),
            vector: self.index.vectorize(query),
            words: query_words,
        }
    }

    /// Signals for the tool at catalog position `tool`.
    #[must_use]
    pub fn signals(&self, query: &PreparedQuery, tool: usize) -> SignalScores {
        let Some(profile) = self.profiles.get(tool) else {
            return SignalScores::default();
        };

        let description = if query.text.is_empty() || profile.description.is_empty() {
            0.0
        } else {
            sequence_ratio(&query.text, &profile.description)
        };

        SignalScores {
            tfidf: self.index.similarity(&query.vector, tool).clamp(0.0, 1.0),
            keyword: overlap_coefficient(&query.terms, &profile.keyword_terms),
            description,
            name: name_similarity(query, &profile.name_key),
        }
    }

    /// Signals for every tool, in catalog order.
    #[must_use]
    pub fn score_all(&self, query: &PreparedQuery) -> Vec<SignalScores> {
        (0..self.profiles.len())
            .map(|tool| self.signals(query, tool))
            .collect()
    }

    #[must_use]
    pub fn name_key(&self, tool: usize) -> Option<&str> {
        self.profiles.get(tool).map(|profile| profile.name_key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Plural-folded terms of a curated keyword.
fn keyword_terms(text: &str) -> BTreeSet<String> {
    words(text).into_iter().map(fold_plural).collect()
}

/// Plural-folded query terms without stopwords, keeping any stopword that
/// appears in `vocabulary`.
fn query_terms(text: &str, vocabulary: &BTreeSet<String>) -> BTreeSet<String> {
    words(text)
        .into_iter()
        .filter_map(|word| {
            let stopword = STOPWORDS.contains(&word.as_str());
            let term = fold_plural(word);
            (!stopword || vocabulary.contains(&term)).then_some(term)
        })
        .collect()
}

/// `|A ∩ B| / min(|A|, |B|)`; 0.0 when either side is empty.
fn overlap_coefficient(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let smaller = a.len().min(b.len());
    if smaller == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / smaller as f64
}

/// Whole-query ratio or best single-word ratio against the tool name, whichever is higher.
fn name_similarity(query: &PreparedQuery, tool_key: &str) -> f64 {
    if query.key.is_empty() || tool_key.is_empty() {
        return 0.0;
    }
    query
        .words
        .iter()
        .map(|word| sequence_ratio(word, tool_key))
        .fold(sequence_ratio(&query.key, tool_key), f64::max)
}
