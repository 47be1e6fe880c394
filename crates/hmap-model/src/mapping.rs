//! Mapping result types produced by the matching engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which layer of the matching cascade produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderMatchType {
    ExactMatch,
    AliasMatch,
    FuzzyMatch,
    NoMatch,
}

impl HeaderMatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactMatch => "ExactMatch",
            Self::AliasMatch => "AliasMatch",
            Self::FuzzyMatch => "FuzzyMatch",
            Self::NoMatch => "NoMatch",
        }
    }
}

impl fmt::Display for HeaderMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended follow-up for a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MappingAction {
    /// Confident enough to apply without review.
    AutoMap,
    /// Plausible, but a person should confirm it.
    Review,
    /// No usable suggestion.
    ManualMap,
}

impl MappingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoMap => "AutoMap",
            Self::Review => "Review",
            Self::ManualMap => "ManualMap",
        }
    }
}

impl fmt::Display for MappingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of mapping one user header onto the canonical schema.
///
/// `canonical_column` is empty exactly when `match_type` is
/// [`HeaderMatchType::NoMatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingResult {
    pub user_column: String,
    pub canonical_column: String,
    /// Match certainty in [0, 1].
    pub confidence: f64,
    pub match_type: HeaderMatchType,
    /// Human-readable explanation of how the match was found.
    pub match_details: String,
    pub recommended_action: MappingAction,
}

impl MappingResult {
    /// Result for a header that matched nothing.
    pub fn no_match(user_column: impl Into<String>) -> Self {
        Self {
            user_column: user_column.into(),
            canonical_column: String::new(),
            confidence: 0.0,
            match_type: HeaderMatchType::NoMatch,
            match_details: "No suitable match found".to_string(),
            recommended_action: MappingAction::ManualMap,
        }
    }

    pub fn is_match(&self) -> bool {
        self.match_type != HeaderMatchType::NoMatch
    }
}
