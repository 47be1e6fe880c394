//! Header-to-schema matching.
//!
//! [`HeaderMatcher`] turns free-text spreadsheet headers into canonical
//! column assignments with a confidence and a recommended action.

#![deny(unsafe_code)]

pub mod engine;
pub mod normalize;
pub mod semantic;
pub mod similarity;

pub use engine::{ALIAS_MATCH_CONFIDENCE, EXACT_MATCH_CONFIDENCE, HeaderMatcher};
pub use normalize::normalize;
pub use semantic::{
    DEFAULT_SEMANTIC_TOP_K, Embedder, EmbeddingScorer, SemanticMatch, SemanticScorer,
    cosine_similarity,
};
pub use similarity::{ratio, token_set_ratio};
