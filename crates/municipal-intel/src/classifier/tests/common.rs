use chrono::NaiveDate;

use crate::classifier::{DocumentClassifier, ScoringConfig, ScoringSettings};

pub(super) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 15).expect("valid date")
}

pub(super) fn classifier() -> DocumentClassifier {
    DocumentClassifier::standard()
        .expect("standard classifier builds")
        .with_reference_date(reference_date())
}

pub(super) fn classifier_with(settings: ScoringSettings) -> DocumentClassifier {
    let config = ScoringConfig::new(settings).expect("settings are valid");
    DocumentClassifier::new(config)
        .expect("classifier builds")
        .with_reference_date(reference_date())
}

pub(super) fn licensing_notice() -> &'static str {
    "CANNABIS RETAIL LICENSING PROGRAM\n\
     Ordinance approved on second reading. The application window opens March 1, 2024 \
     and merit-based selection applies to each dispensary license."
}
