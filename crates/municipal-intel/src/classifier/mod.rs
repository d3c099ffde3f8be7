//! Relevance scoring for municipal documents.
//!
//! A [`DocumentClassifier`] owns an immutable [`ScoringConfig`] and turns raw
//! document text into a [`ClassificationResult`]: keyword and modifier matches,
//! a date-proximity bonus and a heading bonus are summed into one score, and the
//! score is mapped onto a [`PriorityLevel`] through the configured thresholds.
//! Classification performs no I/O and holds no mutable state, so one classifier
//! can be shared freely across threads.

mod batch;
pub mod config;
mod dates;
pub mod domain;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use batch::InvalidInputError;
pub use config::{
    BonusSettings, ConfigurationError, KeywordEntry, KeywordTier, KeywordWeights, ModifierDeltas,
    ModifierEntry, ScoringConfig, ScoringSettings, Thresholds,
};
pub use domain::{ClassificationResult, Document, ModifierMatch, PriorityLevel, RecommendedAction};
pub use policy::classify_score;

use chrono::{Local, NaiveDate};
use dates::DateDetector;
use policy::ReasoningTrail;
use tracing::debug;

/// Stateless scoring engine bound to one configuration.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    config: ScoringConfig,
    dates: DateDetector,
    reference_date: Option<NaiveDate>,
}

impl DocumentClassifier {
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigurationError> {
        let dates =
            DateDetector::new().map_err(|err| ConfigurationError::DatePattern(err.to_string()))?;
        Ok(Self {
            config,
            dates,
            reference_date: None,
        })
    }

    /// Classifier over the built-in keyword tables and thresholds.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::new(ScoringConfig::standard())
    }

    /// Pin the date used for the proximity bonus instead of reading the clock.
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = Some(reference_date);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// The pinned reference date, or today's local date when none was pinned.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn classify(&self, name: &str, text: &str) -> ClassificationResult {
        self.classify_document(&Document::new(name, text))
    }

    pub fn classify_at(
        &self,
        name: &str,
        text: &str,
        reference_date: NaiveDate,
    ) -> ClassificationResult {
        self.evaluate(&Document::new(name, text), reference_date)
    }

    pub fn classify_document(&self, document: &Document) -> ClassificationResult {
        self.evaluate(document, self.reference_date())
    }

    pub fn classify_document_at(
        &self,
        document: &Document,
        reference_date: NaiveDate,
    ) -> ClassificationResult {
        self.evaluate(document, reference_date)
    }

    fn evaluate(&self, document: &Document, reference_date: NaiveDate) -> ClassificationResult {
        let body = document.text.to_lowercase();
        let bonuses = self.config.bonuses();

        let keywords = rules::scan_keywords(&body, &self.config);
        let modifiers = rules::scan_modifiers(&body, &self.config);
        let date_bonus_applied =
            self.dates
                .mentions_date_near(&document.text, reference_date, bonuses.date_window_days);
        let heading_bonus_applied = rules::heading_matches(document, &self.config);

        let mut score = keywords.subtotal + modifiers.subtotal;
        if date_bonus_applied {
            score += bonuses.date_bonus;
        }
        if heading_bonus_applied {
            score += bonuses.title_bonus;
        }

        let classification = classify_score(score, self.config.thresholds());
        let reasoning = ReasoningTrail {
            key_phrases: &keywords.key_phrases,
            modifiers: &modifiers.matches,
            date_bonus: date_bonus_applied.then_some(bonuses.date_bonus),
            heading_bonus: heading_bonus_applied.then_some(bonuses.title_bonus),
        }
        .compose();

        debug!(
            document = %document.name,
            score,
            classification = classification.label(),
            "document classified"
        );

        ClassificationResult {
            document_name: document.name.clone(),
            score,
            classification,
            key_phrases: keywords.key_phrases,
            reasoning,
            modifiers: modifiers.matches,
            date_bonus_applied,
            heading_bonus_applied,
            recommended_action: classification.recommended_action(),
        }
    }
}
