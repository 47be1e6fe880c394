//! Pluggable semantic scoring.
//!
//! The matching engine works without any of this. When a [`SemanticScorer`]
//! is injected, its suggestions join the fuzzy candidate pool.

use std::cmp::Ordering;

use hmap_model::ColumnSchemaStore;
use tracing::debug;

/// Number of semantic suggestions returned per header by default.
pub const DEFAULT_SEMANTIC_TOP_K: usize = 3;

/// One semantic suggestion: a schema key and its similarity in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticMatch {
    pub schema_key: String,
    pub similarity: f64,
}

impl SemanticMatch {
    pub fn new(schema_key: impl Into<String>, similarity: f64) -> Self {
        Self {
            schema_key: schema_key.into(),
            similarity,
        }
    }
}

/// Source of ranked `(schema key, similarity)` suggestions for a header.
pub trait SemanticScorer: Send + Sync {
    /// Suggestions for `header`, best first.
    fn score(&self, header: &str) -> Vec<SemanticMatch>;
}

/// Text-embedding model seam.
pub trait Embedder: Send + Sync {
    /// One embedding vector per input text, in input order.
    fn embed(&self, texts: &[String]) -> Vec<Vec<f32>>;
}

/// [`SemanticScorer`] backed by an [`Embedder`].
///
/// Embeddings for every schema entry are computed once, from the canonical
/// name, description and aliases joined by spaces. Headers are scored by
/// cosine similarity against them.
pub struct EmbeddingScorer<E> {
    embedder: E,
    schema_embeddings: Vec<(String, Vec<f32>)>,
    top_k: usize,
}

impl<E: Embedder> EmbeddingScorer<E> {
    pub fn new(embedder: E, schema: &ColumnSchemaStore) -> Self {
        let mut keys = Vec::with_capacity(schema.len());
        let mut texts = Vec::with_capacity(schema.len());
        for (key, column) in schema.iter() {
            let mut parts = vec![column.canonical_name.as_str()];
            if !column.description.is_empty() {
                parts.push(column.description.as_str());
            }
            parts.extend(column.aliases.iter().map(String::as_str));
            keys.push(key.to_string());
            texts.push(parts.join(" "));
        }
        let embeddings = if texts.is_empty() {
            Vec::new()
        } else {
            embedder.embed(&texts)
        };
        debug!(entries = embeddings.len(), "precomputed schema embeddings");
        Self {
            embedder,
            schema_embeddings: keys.into_iter().zip(embeddings).collect(),
            top_k: DEFAULT_SEMANTIC_TOP_K,
        }
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

impl<E: Embedder> SemanticScorer for EmbeddingScorer<E> {
    fn score(&self, header: &str) -> Vec<SemanticMatch> {
        if self.schema_embeddings.is_empty() {
            return Vec::new();
        }
        let Some(query) = self.embedder.embed(&[header.to_string()]).into_iter().next() else {
            return Vec::new();
        };
        let mut matches: Vec<SemanticMatch> = self
            .schema_embeddings
            .iter()
            .map(|(key, embedding)| {
                SemanticMatch::new(key.clone(), cosine_similarity(&query, embedding))
            })
            .collect();
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        matches.truncate(self.top_k);
        matches
    }
}

/// Cosine similarity of two vectors; 0 when either has zero length or norm.
pub fn cosine_similarity(left: &[f32], right: &[f32]) -> f64 {
    let len = left.len().min(right.len());
    if len == 0 {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut left_norm = 0.0_f64;
    let mut right_norm = 0.0_f64;
    for (a, b) in left[..len].iter().zip(&right[..len]) {
        let (a, b) = (f64::from(*a), f64::from(*b));
        dot += a * b;
        left_norm += a * a;
        right_norm += b * b;
    }
    if left_norm == 0.0 || right_norm == 0.0 {
        return 0.0;
    }
    dot / (left_norm.sqrt() * right_norm.sqrt())
}
