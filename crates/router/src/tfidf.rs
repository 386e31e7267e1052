use std::collections::BTreeMap;

use crate::error::{Result, RouterError};
use crate::tokenizer::tokenize;

/// Sparse term → weight mapping.
///
/// Ordered so that every reduction over a vector (norms, dot products) runs
/// in the same order on every build.
pub type SparseVector = BTreeMap<String, f64>;

/// Count-based TF-IDF index over a fixed corpus of tool descriptions.
///
/// Document `i` corresponds to catalog tool `i`.
#[derive(Debug, Clone)]
pub struct TfIdfIndex {
    documents: Vec<String>,
    doc_tokens: Vec<Vec<String>>,
    idf: BTreeMap<String, f64>,
    doc_vectors: Vec<SparseVector>,
    doc_norms: Vec<f64>,
}

impl TfIdfIndex {
    /// Build the index. Fails with [`RouterError::EmptyCatalog`] on an empty corpus.
    pub fn build<I, S>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents: Vec<String> = documents.into_iter().map(Into::into).collect();
        if documents.is_empty() {
            return Err(RouterError::EmptyCatalog);
        }

        let doc_tokens: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &doc_tokens {
            let mut unique: Vec<&str> = tokens.iter().map(String::as_str).collect();
            unique.sort_unstable();
            unique.dedup();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: BTreeMap<String, f64> = document_frequency
            .into_iter()
            .map(|(term, df)| (term.to_string(), ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0))
            .collect();

        let doc_vectors: Vec<SparseVector> = doc_tokens
            .iter()
            .map(|tokens| weigh(tokens, &idf))
            .collect();
        let doc_norms = doc_vectors.iter().map(l2_norm).collect();

        log::debug!(
            "Built TF-IDF index: {} documents, {} terms",
            documents.len(),
            idf.len()
        );

        Ok(Self {
            documents,
            doc_tokens,
            idf,
            doc_vectors,
            doc_norms,
        })
    }

    /// TF-IDF vector for arbitrary text. Terms outside the corpus vocabulary
    /// carry no weight and are dropped.
    #[must_use]
    pub fn vectorize(&self, text: &str) -> SparseVector {
        weigh(&tokenize(text), &self.idf)
    }

    /// Cosine similarity between `vector` and document `doc`; 0.0 for an
    /// all-zero vector or an out-of-range document.
    #[must_use]
    pub fn similarity(&self, vector: &SparseVector, doc: usize) -> f64 {
        let (Some(doc_vector), Some(&doc_norm)) =
            (self.doc_vectors.get(doc), self.doc_norms.get(doc))
        else {
            return 0.0;
        };
        let query_norm = l2_norm(vector);
        if query_norm == 0.0 || doc_norm == 0.0 {
            return 0.0;
        }

        let dot: f64 = vector
            .iter()
            .filter_map(|(term, weight)| doc_vector.get(term).map(|w| weight * w))
            .sum();

        (dot / (query_norm * doc_norm)).clamp(0.0, 1.0)
    }

    /// Top `top_k` documents by descending cosine similarity to `text`.
    ///
    /// Ties keep catalog order.
    #[must_use]
    pub fn query(&self, text: &str, top_k: usize) -> Vec<(usize, f64)> {
        let vector = self.vectorize(text);
        let mut scored: Vec<(usize, f64)> = (0..self.documents.len())
            .map(|doc| (doc, self.similarity(&vector, doc)))
            .collect();

        // Stable sort keeps lower indices first among equal scores.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        scored
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[must_use]
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    #[must_use]
    pub fn doc_tokens(&self, doc: usize) -> Option<&[String]> {
        self.doc_tokens.get(doc).map(Vec::as_slice)
    }

    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }

    #[must_use]
    pub fn doc_vector(&self, doc: usize) -> Option<&SparseVector> {
        self.doc_vectors.get(doc)
    }
}

/// Term frequency (`count / total`) times corpus IDF.
fn weigh(tokens: &[String], idf: &BTreeMap<String, f64>) -> SparseVector {
    if tokens.is_empty() {
        return SparseVector::new();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let total = tokens.len() as f64;
    counts
        .into_iter()
        .filter_map(|(term, count)| {
            idf.get(term)
                .map(|weight| (term.to_string(), count as f64 / total * weight))
        })
        .collect()
}

fn l2_norm(vector: &SparseVector) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> TfIdfIndex {
        TfIdfIndex::build([
            "Extract code structure showing classes and functions",
            "Show dependency graph",
        ])
        .unwrap()
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let err = TfIdfIndex::build(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, RouterError::EmptyCatalog));
    }

    #[test]
    fn idf_uses_smoothed_formula() {
        let index = TfIdfIndex::build(["alpha beta", "alpha gamma"]).unwrap();

        // df = 2 of N = 2 -> ln(3/3) + 1
        assert!((index.idf("alpha").unwrap() - 1.0).abs() < 1e-12);
        // df = 1 of N = 2 -> ln(3/2) + 1
        let expected = (3.0f64 / 2.0).ln() + 1.0;
        assert!((index.idf("beta").unwrap() - expected).abs() < 1e-12);
        assert!(index.idf("delta").is_none());
    }

    #[test]
    fn term_frequency_is_relative_to_document_length() {
        let index = TfIdfIndex::build(["alpha alpha beta", "gamma"]).unwrap();
        let vector = index.doc_vector(0).unwrap();
        let idf = (3.0f64 / 2.0).ln() + 1.0;

        assert!((vector["alpha"] - 2.0 / 3.0 * idf).abs() < 1e-12);
        assert!((vector["beta"] - 1.0 / 3.0 * idf).abs() < 1e-12);
    }

    #[test]
    fn unseen_terms_do_not_expand_vocabulary() {
        let index = corpus();
        let vector = index.vectorize("teleport dependency");
        assert_eq!(vector.keys().collect::<Vec<_>>(), vec!["dependency"]);
        assert!(index.idf("teleport").is_none());
    }

    #[test]
    fn zero_vector_has_zero_similarity() {
        let index = corpus();
        let vector = index.vectorize("xyzzy quux");
        assert!(vector.is_empty());
        assert_eq!(index.similarity(&vector, 0), 0.0);
        assert_eq!(index.similarity(&vector, 1), 0.0);
    }

    #[test]
    fn empty_document_never_matches() {
        let index = TfIdfIndex::build(["", "show dependency graph"]).unwrap();
        let vector = index.vectorize("show");
        assert_eq!(index.similarity(&vector, 0), 0.0);
        assert!(index.similarity(&vector, 1) > 0.0);
    }

    #[test]
    fn query_ranks_by_similarity() {
        let index = corpus();
        let results = index.query("dependency graph", 2);
        assert_eq!(results[0].0, 1);
        assert!(results[0].1 > results[1].1);
        assert_eq!(results[1].1, 0.0);
    }

    #[test]
    fn query_single_shared_term_similarity() {
        let index = corpus();
        // Only "show" overlaps; the second document has three equally weighted terms.
        let results = index.query("show me the imports", 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, 1);
        assert!((results[0].1 - 1.0 / 3.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let index = TfIdfIndex::build(["shared words", "shared words", "other"]).unwrap();
        let results = index.query("shared", 3);
        assert_eq!(
            results.iter().map(|(doc, _)| *doc).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(results[0].1, results[1].1);
    }

    #[test]
    fn rebuild_is_bit_for_bit_reproducible() {
        let docs = [
            "Extract code structure showing classes and functions",
            "Show dependency graph",
            "Build the control flow graph of a function",
        ];
        let first = TfIdfIndex::build(docs).unwrap();
        let second = TfIdfIndex::build(docs).unwrap();

        for doc in 0..docs.len() {
            let a = first.doc_vector(doc).unwrap();
            let b = second.doc_vector(doc).unwrap();
            assert_eq!(a.len(), b.len());
            for (term, weight) in a {
                assert_eq!(weight.to_bits(), b[term].to_bits());
            }
        }
        let q = first.query("graph of functions", 3);
        let r = second.query("graph of functions", 3);
        assert_eq!(
            q.iter().map(|(d, s)| (*d, s.to_bits())).collect::<Vec<_>>(),
            r.iter().map(|(d, s)| (*d, s.to_bits())).collect::<Vec<_>>()
        );
    }
}
