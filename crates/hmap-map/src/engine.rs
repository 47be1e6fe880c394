//! Header matching engine.

use std::cmp::Ordering;

use hmap_model::{
    ColumnSchema, ColumnSchemaStore, ConfigError, HeaderMatchType, MappingAction, MappingResult,
    MatchingConfig,
};
use tracing::{debug, trace, warn};

use crate::normalize::normalize;
use crate::semantic::SemanticScorer;
use crate::similarity::{ratio, token_set_ratio};

/// Confidence assigned to an exact canonical-name match.
pub const EXACT_MATCH_CONFIDENCE: f64 = 1.0;
/// Confidence assigned to an alias match.
pub const ALIAS_MATCH_CONFIDENCE: f64 = 0.95;

/// Schema entry with its comparison strings normalized once up front.
struct PreparedEntry<'a> {
    key: &'a str,
    column: &'a ColumnSchema,
    name: String,
    aliases: Vec<(&'a str, String)>,
    description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidateKind {
    Name,
    Alias,
    Description,
    Semantic,
}

struct Candidate<'a> {
    column: &'a ColumnSchema,
    target: &'a str,
    /// Score on the 0-100 scale.
    score: f64,
    kind: CandidateKind,
}

impl Candidate<'_> {
    fn details(&self) -> String {
        match self.kind {
            CandidateKind::Name | CandidateKind::Alias => {
                format!(
                    "Fuzzy match against '{}' (score: {})",
                    self.target, self.score
                )
            }
            CandidateKind::Description => format!(
                "Fuzzy match against 'description: {}' (score: {})",
                self.target, self.score
            ),
            CandidateKind::Semantic => format!(
                "Semantic match against '{}' (similarity: {:.2})",
                self.target,
                self.score / 100.0
            ),
        }
    }
}

/// Maps user-provided headers onto canonical schema columns.
///
/// Each header runs through an ordered cascade where the first layer that
/// applies wins:
///
/// 1. exact match on the normalized canonical name (confidence 1.0)
/// 2. exact match on a normalized alias (confidence 0.95)
/// 3. best fuzzy candidate across names, aliases and descriptions, plus
///    semantic suggestions when a scorer is attached
/// 4. no match
///
/// The matcher borrows its schema and configuration for the whole session
/// and never mutates them, so one instance can serve concurrent callers.
///
/// # Example
///
/// ```ignore
/// use hmap_map::HeaderMatcher;
///
/// let matcher = HeaderMatcher::new(&schema, &config)?;
/// let result = matcher.map_single_header("Milk Yield (L)");
/// ```
pub struct HeaderMatcher<'a> {
    config: &'a MatchingConfig,
    entries: Vec<PreparedEntry<'a>>,
    semantic: Option<&'a dyn SemanticScorer>,
}

impl<'a> HeaderMatcher<'a> {
    /// Creates a matcher after validating `config`.
    ///
    /// An empty schema is accepted; every header then maps to
    /// [`HeaderMatchType::NoMatch`].
    pub fn new(
        schema: &'a ColumnSchemaStore,
        config: &'a MatchingConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if schema.is_empty() {
            warn!("schema is empty; every header will need manual mapping");
        }
        let entries = schema
            .iter()
            .filter_map(|(key, column)| {
                if column.canonical_name.trim().is_empty() {
                    warn!(schema_key = key, "skipping schema entry without a canonical name");
                    return None;
                }
                Some(PreparedEntry {
                    key,
                    column,
                    name: normalize(&column.canonical_name),
                    aliases: column
                        .aliases
                        .iter()
                        .map(|alias| (alias.as_str(), normalize(alias)))
                        .collect(),
                    description: normalize(&column.description),
                })
            })
            .collect();
        Ok(Self {
            config,
            entries,
            semantic: None,
        })
    }

    /// Attach a semantic scorer whose suggestions join the fuzzy pool.
    #[must_use]
    pub fn with_semantic_scorer(mut self, scorer: &'a dyn SemanticScorer) -> Self {
        self.semantic = Some(scorer);
        self
    }

    /// Maps every header in order, one result per header.
    pub fn map_headers<S: AsRef<str>>(&self, headers: &[S]) -> Vec<MappingResult> {
        headers
            .iter()
            .map(|header| self.map_single_header(header.as_ref()))
            .collect()
    }

    /// Maps one header through the exact, alias and fuzzy layers.
    pub fn map_single_header(&self, user_header: &str) -> MappingResult {
        let normalized = normalize(user_header);
        let result = self
            .exact_match(user_header, &normalized)
            .or_else(|| self.alias_match(user_header, &normalized))
            .or_else(|| self.fuzzy_match(user_header, &normalized))
            .unwrap_or_else(|| MappingResult::no_match(user_header));
        debug!(
            header = user_header,
            canonical = %result.canonical_column,
            match_type = %result.match_type,
            confidence = result.confidence,
            action = %result.recommended_action,
            "mapped header"
        );
        result
    }

    /// Recommended action for `confidence` under the required/optional tier.
    pub fn determine_action(&self, confidence: f64, is_required: bool) -> MappingAction {
        self.config.determine_action(confidence, is_required)
    }

    /// Ranks schema entries by name/alias similarity to `user_header`.
    ///
    /// Unlike [`Self::map_single_header`] this scores every entry, ignores
    /// descriptions, and keeps only candidates at or above the fuzzy floor.
    /// Results are sorted by confidence, highest first, and truncated to
    /// `top_n`.
    pub fn get_top_matches(&self, user_header: &str, top_n: usize) -> Vec<MappingResult> {
        let normalized = normalize(user_header);
        let floor = self.config.fuzzy_min_threshold;
        let mut results: Vec<MappingResult> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let name_score = ratio(&normalized, &entry.name);
                let mut best_alias: Option<(&str, u32)> = None;
                for (alias, normalized_alias) in &entry.aliases {
                    let score = ratio(&normalized, normalized_alias);
                    if score > best_alias.map_or(0, |(_, best)| best) {
                        best_alias = Some((*alias, score));
                    }
                }
                let (target, score) = match best_alias {
                    Some((alias, alias_score)) if alias_score > name_score => (alias, alias_score),
                    _ => (entry.column.canonical_name.as_str(), name_score),
                };
                if score < floor {
                    return None;
                }
                let confidence = f64::from(score) / 100.0;
                Some(MappingResult {
                    user_column: user_header.to_string(),
                    canonical_column: entry.column.canonical_name.clone(),
                    confidence,
                    match_type: HeaderMatchType::FuzzyMatch,
                    match_details: format!("Matched against '{target}'"),
                    recommended_action: self.determine_action(confidence, entry.column.required),
                })
            })
            .collect();
        // Stable sort keeps schema order among equal confidences.
        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(top_n);
        results
    }

    fn exact_match(&self, user_header: &str, normalized: &str) -> Option<MappingResult> {
        let entry = self.entries.iter().find(|entry| entry.name == normalized)?;
        Some(MappingResult {
            user_column: user_header.to_string(),
            canonical_column: entry.column.canonical_name.clone(),
            confidence: EXACT_MATCH_CONFIDENCE,
            match_type: HeaderMatchType::ExactMatch,
            match_details: "Exact match to canonical name".to_string(),
            recommended_action: MappingAction::AutoMap,
        })
    }

    fn alias_match(&self, user_header: &str, normalized: &str) -> Option<MappingResult> {
        self.entries.iter().find_map(|entry| {
            let (alias, _) = entry
                .aliases
                .iter()
                .find(|(_, normalized_alias)| normalized_alias == normalized)?;
            Some(MappingResult {
                user_column: user_header.to_string(),
                canonical_column: entry.column.canonical_name.clone(),
                confidence: ALIAS_MATCH_CONFIDENCE,
                match_type: HeaderMatchType::AliasMatch,
                match_details: format!("Matched alias: '{alias}'"),
                recommended_action: MappingAction::AutoMap,
            })
        })
    }

    fn fuzzy_match(&self, user_header: &str, normalized: &str) -> Option<MappingResult> {
        let candidates = self.candidate_pool(user_header, normalized);

        // First maximum wins.
        let mut best: Option<&Candidate<'_>> = None;
        for candidate in &candidates {
            if best.is_none_or(|current| candidate.score > current.score) {
                best = Some(candidate);
            }
        }
        let best = best?;
        trace!(
            header = user_header,
            candidates = candidates.len(),
            best_score = best.score,
            "fuzzy candidate pool scored"
        );
        if best.score < f64::from(self.config.fuzzy_min_threshold) {
            return None;
        }
        let confidence = best.score / 100.0;
        Some(MappingResult {
            user_column: user_header.to_string(),
            canonical_column: best.column.canonical_name.clone(),
            confidence,
            match_type: HeaderMatchType::FuzzyMatch,
            match_details: best.details(),
            recommended_action: self.determine_action(confidence, best.column.required),
        })
    }

    fn candidate_pool(&self, user_header: &str, normalized: &str) -> Vec<Candidate<'a>> {
        let mut candidates = Vec::with_capacity(self.entries.len() * 3);
        for entry in &self.entries {
            candidates.push(Candidate {
                column: entry.column,
                target: entry.column.canonical_name.as_str(),
                score: f64::from(ratio(normalized, &entry.name)),
                kind: CandidateKind::Name,
            });
            for (alias, normalized_alias) in &entry.aliases {
                candidates.push(Candidate {
                    column: entry.column,
                    target: *alias,
                    score: f64::from(ratio(normalized, normalized_alias)),
                    kind: CandidateKind::Alias,
                });
            }
            // Description matches count half.
            candidates.push(Candidate {
                column: entry.column,
                target: entry.column.description.as_str(),
                score: f64::from(token_set_ratio(normalized, &entry.description) / 2),
                kind: CandidateKind::Description,
            });
        }
        if let Some(scorer) = self.semantic {
            for suggestion in scorer.score(user_header) {
                let Some(entry) = self
                    .entries
                    .iter()
                    .find(|entry| entry.key == suggestion.schema_key)
                else {
                    debug!(
                        schema_key = %suggestion.schema_key,
                        "ignoring semantic suggestion for unknown schema key"
                    );
                    continue;
                };
                candidates.push(Candidate {
                    column: entry.column,
                    target: entry.key,
                    score: (suggestion.similarity * 100.0).clamp(0.0, 100.0),
                    kind: CandidateKind::Semantic,
                });
            }
        }
        candidates
    }
}
