use std::io::Write;
use tempfile::NamedTempFile;

use crate::{
    analyze, AnalysisConfig, AnalysisEngine, CascadeStep, Label, ModalityError, ModalityScore,
    RuleConfig, RuleKind, Thresholds,
};

#[test]
fn default_config_matches_builtin_engine() {
    let engine = AnalysisEngine::from_config(&AnalysisConfig::default()).unwrap();
    for text in [
        "2 + 2 = 4",
        "There exists a married bachelor.",
        "It might rain tomorrow.",
        "You must pay rent. I think so.",
        "The cat sat. The dog ran. Birds fly south. You should leave.",
    ] {
        assert_eq!(engine.analyze(text), analyze(text), "{text}");
    }
}

#[test]
fn added_necessity_pattern() {
    assert_eq!(analyze("Water is H2O.").classification, Label::NeutralContingent);

    let mut config = AnalysisConfig::default();
    config.rules.necessity_patterns.push("water is h2o".to_string());
    let engine = AnalysisEngine::from_config(&config).unwrap();

    let result = engine.analyze("Water is H2O.");
    assert_eq!(result.aggregate_scores, ModalityScore::new(90.0, 18.0, 0.0));
    assert_eq!(result.classification, Label::LogicallyNecessary);

    let matched = engine.matcher().match_necessity("water is h2o.").unwrap();
    assert_eq!(matched.kind, RuleKind::Necessity);
    assert_eq!(matched.pattern, "water is h2o");
}

#[test]
fn emptied_necessity_table_keeps_arithmetic() {
    let config = AnalysisConfig {
        rules: RuleConfig {
            necessity_patterns: Vec::new(),
            ..RuleConfig::default()
        },
        ..AnalysisConfig::default()
    };
    let engine = AnalysisEngine::from_config(&config).unwrap();

    assert_eq!(
        engine.analyze("All triangles have three sides.").classification,
        Label::NeutralContingent
    );
    let matched = engine.matcher().match_necessity("2 + 2 = 4").unwrap();
    assert_eq!(matched.kind, RuleKind::Arithmetic);
    assert_eq!(matched.score, 95.0);
}

#[test]
fn invalid_pattern_is_reported() {
    let mut config = AnalysisConfig::default();
    config.rules.impossibility_patterns.push("(unclosed".to_string());

    match AnalysisEngine::from_config(&config) {
        Err(ModalityError::Pattern { table, pattern, .. }) => {
            assert_eq!(table, "impossibility");
            assert_eq!(pattern, "(unclosed");
        }
        other => panic!("expected a pattern error, got {other:?}"),
    }
}

#[test]
fn diverging_thresholds_are_rejected() {
    let config = AnalysisConfig {
        thresholds: Thresholds {
            classification_threshold: 30.0,
            ..Thresholds::default()
        },
        ..AnalysisConfig::default()
    };
    assert!(matches!(
        AnalysisEngine::from_config(&config),
        Err(ModalityError::Config(_))
    ));
}

#[test]
fn exclusion_phrase_suppresses_impossibility() {
    let engine = AnalysisEngine::new();
    assert!(engine
        .matcher()
        .match_impossibility("these principles say true and false cannot mix")
        .is_none());
    assert_eq!(
        engine
            .matcher()
            .match_impossibility("it is true and false")
            .map(|m| m.kind),
        Some(RuleKind::Impossibility)
    );
}

#[test]
fn keywords_are_matched_lowercase() {
    let mut config = AnalysisConfig::default();
    config.rules.empirical_markers.push("Forecast".to_string());
    let engine = AnalysisEngine::from_config(&config).unwrap();

    let (scores, hits) = engine.contingent().score_with_trace("the forecast says rain");
    assert_eq!(scores, ModalityScore::new(0.0, 60.0, 0.0));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].step, CascadeStep::Empirical);
    assert_eq!(hits[0].keyword, "forecast");
}

#[test]
fn custom_thresholds_change_aggregation() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[thresholds]
consensus_boost = 1.0
"#,
    )
    .unwrap();
    let engine = AnalysisEngine::from_config(&config).unwrap();

    let boosted = analyze("Is it possible? Perhaps. It could be. Maybe not.");
    let flat = engine.analyze("Is it possible? Perhaps. It could be. Maybe not.");
    assert!((boosted.aggregate_scores.possibility - 91.0).abs() < 1e-9);
    assert!((flat.aggregate_scores.possibility - 70.0).abs() < 1e-9);
    assert_eq!(flat.classification, Label::Possible);
}

#[test]
fn config_loaded_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[thresholds]
necessity_rule_score = 80.0

[rules]
necessity_patterns = ["all squares have four sides"]
"#
    )
    .unwrap();

    let config = AnalysisConfig::load(file.path()).unwrap();
    let engine = AnalysisEngine::from_config(&config).unwrap();

    let result = engine.analyze("All squares have four sides.");
    assert_eq!(result.aggregate_scores, ModalityScore::new(80.0, 16.0, 0.0));
    assert_eq!(result.classification, Label::StronglyNecessary);
    assert_eq!(engine.rules().necessity_len(), 1);
}
