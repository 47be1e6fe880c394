use hmap_map::{HeaderMatcher, SemanticMatch, SemanticScorer};
use hmap_model::{
    ColumnSchema, ColumnSchemaStore, HeaderMatchType, MappingAction, MatchingConfig,
    ThresholdConfig,
};

fn dairy_schema() -> ColumnSchemaStore {
    [
        (
            "milk_yield",
            ColumnSchema::new("Milk Yield (L)")
                .with_required(true)
                .with_aliases(["MilkYield", "Yield L"]),
        ),
        (
            "tank_id",
            ColumnSchema::new("Tank ID")
                .with_description("identifier of the storage tank")
                .with_aliases(["Tank", "Tank Number"]),
        ),
        ("tank_volume", ColumnSchema::new("Tank Volume")),
        ("barn_temp", ColumnSchema::new("Barn Temperature")),
    ]
    .into_iter()
    .collect()
}

fn milk_only_schema() -> ColumnSchemaStore {
    [(
        "milk_yield",
        ColumnSchema::new("Milk Yield (L)")
            .with_required(true)
            .with_aliases(["MilkYield", "Yield L"]),
    )]
    .into_iter()
    .collect()
}

fn strict_required_config() -> MatchingConfig {
    MatchingConfig {
        fuzzy_min_threshold: 60,
        required_thresholds: ThresholdConfig::new(0.90, 0.75),
        optional_thresholds: ThresholdConfig::new(0.85, 0.70),
    }
}

/// Scorer that returns the same suggestions for every header.
struct FixedScorer(Vec<SemanticMatch>);

impl SemanticScorer for FixedScorer {
    fn score(&self, _header: &str) -> Vec<SemanticMatch> {
        self.0.clone()
    }
}

#[test]
fn alias_scenario_auto_maps() {
    let schema = milk_only_schema();
    let config = strict_required_config();
    let matcher = HeaderMatcher::new(&schema, &config).unwrap();

    let result = matcher.map_single_header("Yield L");
    assert_eq!(result.match_type, HeaderMatchType::AliasMatch);
    assert_eq!(result.canonical_column, "Milk Yield (L)");
    assert_eq!(result.confidence, 0.95);
    assert_eq!(result.recommended_action, MappingAction::AutoMap);
}

#[test]
fn misspelled_header_falls_back_to_fuzzy() {
    let schema = milk_only_schema();
    let config = strict_required_config();
    let matcher = HeaderMatcher::new(&schema, &config).unwrap();

    let result = matcher.map_single_header("milk yeild");
    assert_eq!(result.match_type, HeaderMatchType::FuzzyMatch);
    assert_eq!(result.canonical_column, "Milk Yield (L)");
    assert!(
        (0.8..0.9).contains(&result.confidence),
        "confidence {} outside 0.8-0.9",
        result.confidence
    );
    // Best candidate is the "MilkYield" alias at 84.
    assert_eq!(result.confidence, 0.84);
    assert_eq!(result.recommended_action, MappingAction::Review);
    assert_eq!(
        result.match_details,
        "Fuzzy match against 'MilkYield' (score: 84)"
    );
}

#[test]
fn unrelated_header_needs_manual_mapping() {
    let schema = milk_only_schema();
    let config = strict_required_config();
    let matcher = HeaderMatcher::new(&schema, &config).unwrap();

    let result = matcher.map_single_header("Barn Temperature Sensor 3");
    assert_eq!(result.match_type, HeaderMatchType::NoMatch);
    assert!(result.canonical_column.is_empty());
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.recommended_action, MappingAction::ManualMap);
}

#[test]
fn exact_layer_beats_alias_layer() {
    // "Tank" is an alias of the first entry and the canonical name of the second.
    let schema: ColumnSchemaStore = [
        (
            "tank_id",
            ColumnSchema::new("Tank ID").with_aliases(["Tank"]),
        ),
        ("tank", ColumnSchema::new("Tank")),
    ]
    .into_iter()
    .collect();
    let config = MatchingConfig::default();
    let matcher = HeaderMatcher::new(&schema, &config).unwrap();

    let result = matcher.map_single_header("TANK");
    assert_eq!(result.match_type, HeaderMatchType::ExactMatch);
    assert_eq!(result.canonical_column, "Tank");
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn first_alias_in_schema_order_wins() {
    let schema: ColumnSchemaStore = [
        ("first", ColumnSchema::new("First").with_aliases(["Shared"])),
        ("second", ColumnSchema::new("Second").with_aliases(["shared"])),
    ]
    .into_iter()
    .collect();
    let config = MatchingConfig::default();
    let matcher = HeaderMatcher::new(&schema, &config).unwrap();

    let result = matcher.map_single_header("shared");
    assert_eq!(result.canonical_column, "First");
}

#[test]
fn map_headers_preserves_order() {
    let schema = dairy_schema();
    let config = MatchingConfig::default();
    let matcher = HeaderMatcher::new(&schema, &config).unwrap();

    let headers = vec!["Tank ID", "Yield L", "???"];
    let results = matcher.map_headers(&headers);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].user_column, "Tank ID");
    assert_eq!(results[0].match_type, HeaderMatchType::ExactMatch);
    assert_eq!(results[1].match_type, HeaderMatchType::AliasMatch);
    assert_eq!(results[2].match_type, HeaderMatchType::NoMatch);
}

#[test]
fn empty_schema_maps_everything_to_no_match() {
    let schema = ColumnSchemaStore::new();
    let config = MatchingConfig::default();
    let matcher = HeaderMatcher::new(&schema, &config).unwrap();

    let result = matcher.map_single_header("Milk Yield");
    assert_eq!(result.match_type, HeaderMatchType::NoMatch);
    assert!(matcher.get_top_matches("Milk Yield", 3).is_empty());
}

#[test]
fn top_matches_are_ranked_and_truncated() {
    let schema = dairy_schema();
    let config = MatchingConfig::default();
    let matcher = HeaderMatcher::new(&schema, &config).unwrap();

    let all = matcher.get_top_matches("tank numbr", 10);
    let names: Vec<&str> = all.iter().map(|m| m.canonical_column.as_str()).collect();
    assert_eq!(names, vec!["Tank ID", "Tank Volume"]);
    assert_eq!(all[0].confidence, 0.95);
    assert_eq!(all[0].match_details, "Matched against 'Tank Number'");
    assert_eq!(all[0].recommended_action, MappingAction::AutoMap);
    assert_eq!(all[1].confidence, 0.67);
    assert_eq!(all[1].recommended_action, MappingAction::ManualMap);

    let top = matcher.get_top_matches("tank numbr", 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].canonical_column, "Tank ID");
}

#[test]
fn top_matches_score_every_entry_even_on_exact_hit() {
    let schema = dairy_schema();
    let config = MatchingConfig::default().with_fuzzy_min_threshold(50);
    let matcher = HeaderMatcher::new(&schema, &config).unwrap();

    let top = matcher.get_top_matches("Tank ID", 5);
    let names: Vec<&str> = top.iter().map(|m| m.canonical_column.as_str()).collect();
    assert_eq!(names, vec!["Tank ID", "Tank Volume"]);
    assert_eq!(top[0].confidence, 1.0);
    assert_eq!(top[0].match_type, HeaderMatchType::FuzzyMatch);
    assert_eq!(top[1].confidence, 0.56);
}

#[test]
fn semantic_suggestion_can_win_the_fuzzy_layer() {
    let schema = dairy_schema();
    let config = MatchingConfig::default();
    let scorer = FixedScorer(vec![SemanticMatch::new("barn_temp", 0.93)]);

    let lexical = HeaderMatcher::new(&schema, &config).unwrap();
    assert_eq!(
        lexical.map_single_header("Shed Heat Reading").match_type,
        HeaderMatchType::NoMatch
    );

    let matcher = HeaderMatcher::new(&schema, &config)
        .unwrap()
        .with_semantic_scorer(&scorer);
    let result = matcher.map_single_header("Shed Heat Reading");
    assert_eq!(result.match_type, HeaderMatchType::FuzzyMatch);
    assert_eq!(result.canonical_column, "Barn Temperature");
    assert!((result.confidence - 0.93).abs() < 1e-9);
    assert_eq!(result.recommended_action, MappingAction::AutoMap);
    assert_eq!(
        result.match_details,
        "Semantic match against 'barn_temp' (similarity: 0.93)"
    );
}

#[test]
fn semantic_layer_does_not_override_exact_or_alias() {
    let schema = dairy_schema();
    let config = MatchingConfig::default();
    let scorer = FixedScorer(vec![SemanticMatch::new("barn_temp", 1.0)]);
    let matcher = HeaderMatcher::new(&schema, &config)
        .unwrap()
        .with_semantic_scorer(&scorer);

    assert_eq!(
        matcher.map_single_header("Tank Number").match_type,
        HeaderMatchType::AliasMatch
    );
    assert_eq!(
        matcher.map_single_header("tank_volume").match_type,
        HeaderMatchType::ExactMatch
    );
}

#[test]
fn silent_scorer_produces_identical_results() {
    let schema = dairy_schema();
    let config = MatchingConfig::default().with_fuzzy_min_threshold(20);
    let silent = FixedScorer(Vec::new());
    let unknown_keys = FixedScorer(vec![SemanticMatch::new("not_in_schema", 0.99)]);

    let plain = HeaderMatcher::new(&schema, &config).unwrap();
    let with_silent = HeaderMatcher::new(&schema, &config)
        .unwrap()
        .with_semantic_scorer(&silent);
    let with_unknown = HeaderMatcher::new(&schema, &config)
        .unwrap()
        .with_semantic_scorer(&unknown_keys);

    let headers = [
        "Milk Yield (L)",
        "Yield L",
        "milk yeild",
        "tank numbr",
        "storage tank",
        "Barn Temperature Sensor 3",
        "",
        "%DM Maize DM",
    ];
    for header in headers {
        let expected = plain.map_single_header(header);
        assert_eq!(with_silent.map_single_header(header), expected, "{header}");
        assert_eq!(with_unknown.map_single_header(header), expected, "{header}");
    }
}
