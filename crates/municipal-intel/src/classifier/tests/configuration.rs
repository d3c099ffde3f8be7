use super::common::*;
use crate::classifier::{
    BonusSettings, ConfigurationError, KeywordTier, KeywordWeights, ModifierDeltas, PriorityLevel,
    ScoringConfig, ScoringSettings, Thresholds,
};

#[test]
fn standard_settings_pass_validation() {
    let config = ScoringConfig::new(ScoringSettings::default()).expect("defaults are valid");

    assert_eq!(config.keywords().len(), 24);
    assert_eq!(config.modifiers().len(), 7);
    assert_eq!(config.thresholds(), &Thresholds::default());
    assert_eq!(config.keywords()[0].tier, KeywordTier::High);
    assert_eq!(config.keywords()[0].points, 10);
}

#[test]
fn phrase_listed_in_two_tiers_is_rejected() {
    let mut settings = ScoringSettings::default();
    settings.low_value_keywords.push("Public Hearing".to_string());

    let err = ScoringConfig::new(settings).expect_err("overlap rejected");

    assert_eq!(
        err,
        ConfigurationError::OverlappingPhrase {
            phrase: "public hearing".to_string(),
            first: "medium_value_keywords",
            second: "low_value_keywords",
        }
    );
}

#[test]
fn keyword_reused_as_modifier_is_rejected() {
    let mut settings = ScoringSettings::default();
    settings.negative_modifiers.push("dispensary".to_string());

    assert!(matches!(
        ScoringConfig::new(settings),
        Err(ConfigurationError::OverlappingPhrase { .. })
    ));
}

#[test]
fn thresholds_must_descend_strictly() {
    for thresholds in [
        Thresholds {
            high: 30,
            medium: 30,
            low: 10,
        },
        Thresholds {
            high: 70,
            medium: 5,
            low: 10,
        },
    ] {
        let settings = ScoringSettings {
            thresholds,
            ..ScoringSettings::default()
        };
        assert!(matches!(
            ScoringConfig::new(settings),
            Err(ConfigurationError::ThresholdOrder { .. })
        ));
    }
}

#[test]
fn blank_phrases_and_bad_weights_are_rejected() {
    let mut blank = ScoringSettings::default();
    blank.high_value_keywords.push("   ".to_string());
    assert_eq!(
        ScoringConfig::new(blank).expect_err("blank rejected"),
        ConfigurationError::EmptyPhrase {
            table: "high_value_keywords"
        }
    );

    let zero_weight = ScoringSettings {
        weights: KeywordWeights {
            low: 0,
            ..KeywordWeights::default()
        },
        ..ScoringSettings::default()
    };
    assert!(matches!(
        ScoringConfig::new(zero_weight),
        Err(ConfigurationError::NonPositiveWeight {
            tier: KeywordTier::Low,
            weight: 0
        })
    ));

    let flipped = ScoringSettings {
        modifier_deltas: ModifierDeltas {
            positive: 3,
            negative: 3,
        },
        ..ScoringSettings::default()
    };
    assert!(matches!(
        ScoringConfig::new(flipped),
        Err(ConfigurationError::ModifierSign {
            kind: "negative",
            ..
        })
    ));

    let negative_window = ScoringSettings {
        bonuses: BonusSettings {
            date_window_days: -1,
            ..BonusSettings::default()
        },
        ..ScoringSettings::default()
    };
    assert!(matches!(
        ScoringConfig::new(negative_window),
        Err(ConfigurationError::NegativeBonus {
            name: "date_window_days",
            ..
        })
    ));
}

#[test]
fn partial_json_overrides_keep_remaining_defaults() {
    let settings = ScoringSettings::from_json(
        r#"{
            "high_value_keywords": ["Adult-Use Permit"],
            "thresholds": { "high": 20 }
        }"#,
    )
    .expect("json parses");

    assert_eq!(settings.high_value_keywords, vec!["Adult-Use Permit"]);
    assert_eq!(settings.thresholds.high, 20);
    assert_eq!(settings.thresholds.medium, 30);
    assert_eq!(settings.thresholds.low, 10);
    assert_eq!(settings.medium_value_keywords, ScoringSettings::default().medium_value_keywords);

    assert!(matches!(
        ScoringConfig::new(settings),
        Err(ConfigurationError::ThresholdOrder { .. })
    ));
}

#[test]
fn custom_tables_drive_scoring() {
    let settings = ScoringSettings {
        high_value_keywords: vec!["Adult-Use Permit".to_string()],
        medium_value_keywords: vec!["hemp".to_string()],
        low_value_keywords: Vec::new(),
        positive_modifiers: vec!["granted".to_string()],
        negative_modifiers: Vec::new(),
        weights: KeywordWeights {
            high: 25,
            medium: 5,
            low: 1,
        },
        thresholds: Thresholds {
            high: 30,
            medium: 20,
            low: 5,
        },
        ..ScoringSettings::default()
    };
    let classifier = classifier_with(settings);

    let result = classifier.classify("permits", "ADULT-USE PERMIT granted for the hemp shop.");

    assert_eq!(result.score, 33);
    assert_eq!(result.classification, PriorityLevel::HighPriority);
    assert_eq!(result.key_phrases, vec!["adult-use permit", "hemp"]);
}

#[test]
fn bonus_values_are_configurable() {
    let settings = ScoringSettings {
        bonuses: BonusSettings {
            date_bonus: 8,
            date_window_days: 10,
            ..BonusSettings::default()
        },
        ..ScoringSettings::default()
    };
    let classifier = classifier_with(settings);

    let near = classifier.classify("calendar", "Session on 2024-02-20.");
    let outside = classifier.classify("calendar", "Session on 2024-03-01.");

    assert_eq!(near.score, 8);
    assert_eq!(near.reasoning, "Recent dates detected (+8 points)");
    assert_eq!(outside.score, 0);
}

#[test]
fn weights_that_could_overflow_the_score_are_rejected() {
    let huge_high = ScoringSettings {
        weights: KeywordWeights {
            high: i32::MAX / 2 + 1,
            ..KeywordWeights::default()
        },
        ..ScoringSettings::default()
    };
    assert!(matches!(
        ScoringConfig::new(huge_high),
        Err(ConfigurationError::ScoreRange { .. })
    ));

    let huge_negative = ScoringSettings {
        modifier_deltas: ModifierDeltas {
            positive: 3,
            negative: i32::MIN,
        },
        ..ScoringSettings::default()
    };
    assert!(matches!(
        ScoringConfig::new(huge_negative),
        Err(ConfigurationError::ScoreRange { .. })
    ));
}

#[test]
fn largest_weights_that_fit_still_score() {
    let settings = ScoringSettings {
        high_value_keywords: vec!["cannabis retail".to_string()],
        medium_value_keywords: Vec::new(),
        low_value_keywords: Vec::new(),
        positive_modifiers: Vec::new(),
        weights: KeywordWeights {
            high: i32::MAX - 7,
            ..KeywordWeights::default()
        },
        thresholds: Thresholds {
            high: i32::MAX - 7,
            medium: 30,
            low: 10,
        },
        ..ScoringSettings::default()
    };
    let classifier = classifier_with(settings);

    let result = classifier.classify("x", "cannabis retail dispensary license");

    assert_eq!(result.score, i32::MAX - 7);
    assert_eq!(result.classification, PriorityLevel::HighPriority);
}
