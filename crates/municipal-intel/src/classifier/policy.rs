use super::config::Thresholds;
use super::domain::{ModifierMatch, PriorityLevel};

/// Map a score onto its tier. A score equal to a threshold belongs to that tier.
pub fn classify_score(score: i32, thresholds: &Thresholds) -> PriorityLevel {
    if score >= thresholds.high {
        PriorityLevel::HighPriority
    } else if score >= thresholds.medium {
        PriorityLevel::MediumPriority
    } else if score >= thresholds.low {
        PriorityLevel::LowPriority
    } else {
        PriorityLevel::Irrelevant
    }
}

/// Contributing factors collected while scoring, in presentation order.
pub(crate) struct ReasoningTrail<'a> {
    pub key_phrases: &'a [String],
    pub modifiers: &'a [ModifierMatch],
    pub date_bonus: Option<i32>,
    pub heading_bonus: Option<i32>,
}

impl ReasoningTrail<'_> {
    pub(crate) fn compose(&self) -> String {
        let mut parts = Vec::new();

        if !self.key_phrases.is_empty() {
            parts.push(format!("Found key phrases: {}", self.key_phrases.join(", ")));
        }

        if !self.modifiers.is_empty() {
            let modifiers: Vec<String> = self
                .modifiers
                .iter()
                .map(|modifier| format!("{} ({:+})", modifier.phrase, modifier.delta))
                .collect();
            parts.push(format!("Context modifiers: {}", modifiers.join(", ")));
        }

        if let Some(points) = self.date_bonus {
            parts.push(format!("Recent dates detected (+{points} points)"));
        }

        if let Some(points) = self.heading_bonus {
            parts.push(format!("Keywords in headings (+{points} points)"));
        }

        if parts.is_empty() {
            "Limited relevance".to_string()
        } else {
            parts.join("; ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_the_tier_they_define() {
        let thresholds = Thresholds::default();

        assert_eq!(classify_score(70, &thresholds), PriorityLevel::HighPriority);
        assert_eq!(classify_score(69, &thresholds), PriorityLevel::MediumPriority);
        assert_eq!(classify_score(30, &thresholds), PriorityLevel::MediumPriority);
        assert_eq!(classify_score(29, &thresholds), PriorityLevel::LowPriority);
        assert_eq!(classify_score(10, &thresholds), PriorityLevel::LowPriority);
        assert_eq!(classify_score(9, &thresholds), PriorityLevel::Irrelevant);
        assert_eq!(classify_score(-12, &thresholds), PriorityLevel::Irrelevant);
    }

    #[test]
    fn tier_never_drops_as_score_rises() {
        let thresholds = Thresholds::default();
        let mut previous = classify_score(-50, &thresholds).rank();

        for score in -49..=200 {
            let rank = classify_score(score, &thresholds).rank();
            assert!(rank >= previous, "tier dropped at score {score}");
            previous = rank;
        }
    }

    #[test]
    fn reasoning_lists_factors_in_fixed_order() {
        let key_phrases = vec!["dispensary license".to_string(), "dispensary".to_string()];
        let modifiers = vec![
            ModifierMatch {
                phrase: "approved".to_string(),
                delta: 3,
            },
            ModifierMatch {
                phrase: "rejected".to_string(),
                delta: -3,
            },
        ];
        let trail = ReasoningTrail {
            key_phrases: &key_phrases,
            modifiers: &modifiers,
            date_bonus: Some(5),
            heading_bonus: Some(2),
        };

        assert_eq!(
            trail.compose(),
            "Found key phrases: dispensary license, dispensary; \
             Context modifiers: approved (+3), rejected (-3); \
             Recent dates detected (+5 points); \
             Keywords in headings (+2 points)"
        );
    }

    #[test]
    fn empty_trail_reports_limited_relevance() {
        let trail = ReasoningTrail {
            key_phrases: &[],
            modifiers: &[],
            date_bonus: None,
            heading_bonus: None,
        };

        assert_eq!(trail.compose(), "Limited relevance");
    }
}
