use crate::classifier::{
    KeywordTier, PriorityLevel, RecommendedAction, ScoringConfig, Thresholds,
};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseGroup {
    pub label: &'static str,
    pub points: i32,
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierAction {
    pub classification: PriorityLevel,
    pub minimum_score: Option<i32>,
    pub action: RecommendedAction,
}

/// Human-readable description of how the active configuration scores documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Methodology {
    pub keywords: Vec<PhraseGroup>,
    pub modifiers: Vec<PhraseGroup>,
    pub date_bonus: i32,
    pub date_window_days: i64,
    pub heading_bonus: i32,
    pub thresholds: Thresholds,
    pub actions: Vec<TierAction>,
}

impl Methodology {
    pub fn from_config(config: &ScoringConfig) -> Self {
        let settings = config.settings();
        let keywords = KeywordTier::ordered()
            .into_iter()
            .map(|tier| PhraseGroup {
                label: match tier {
                    KeywordTier::High => "High value keywords",
                    KeywordTier::Medium => "Medium value keywords",
                    KeywordTier::Low => "Low value keywords",
                },
                points: settings.weights.for_tier(tier),
                phrases: config
                    .keywords()
                    .iter()
                    .filter(|entry| entry.tier == tier)
                    .map(|entry| entry.phrase.clone())
                    .collect(),
            })
            .collect();

        let modifier_phrases = |positive: bool| -> Vec<String> {
            config
                .modifiers()
                .iter()
                .filter(|entry| (entry.delta > 0) == positive)
                .map(|entry| entry.phrase.clone())
                .collect()
        };
        let modifiers = vec![
            PhraseGroup {
                label: "Positive modifiers",
                points: settings.modifier_deltas.positive,
                phrases: modifier_phrases(true),
            },
            PhraseGroup {
                label: "Negative modifiers",
                points: settings.modifier_deltas.negative,
                phrases: modifier_phrases(false),
            },
        ];

        let thresholds = *config.thresholds();
        let actions = PriorityLevel::ordered()
            .into_iter()
            .map(|classification| TierAction {
                classification,
                minimum_score: match classification {
                    PriorityLevel::HighPriority => Some(thresholds.high),
                    PriorityLevel::MediumPriority => Some(thresholds.medium),
                    PriorityLevel::LowPriority => Some(thresholds.low),
                    PriorityLevel::Irrelevant => None,
                },
                action: classification.recommended_action(),
            })
            .collect();

        let bonuses = config.bonuses();
        Self {
            keywords,
            modifiers,
            date_bonus: bonuses.date_bonus,
            date_window_days: bonuses.date_window_days,
            heading_bonus: bonuses.title_bonus,
            thresholds,
            actions,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Municipal Document Classification Methodology");
        let _ = writeln!(out, "=============================================");
        let _ = writeln!(out);
        let _ = writeln!(out, "Keyword categories (each distinct phrase counts once):");
        for group in self.keywords.iter().chain(&self.modifiers) {
            let _ = writeln!(
                out,
                "- {} ({:+} points each): {}",
                group.label,
                group.points,
                group.phrases.join(", ")
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Date bonus: {:+} points once when a date falls within {} days of the reference date",
            self.date_bonus, self.date_window_days
        );
        let _ = writeln!(
            out,
            "Heading bonus: {:+} points once when a high or medium value keyword appears in the title or a heading",
            self.heading_bonus
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Classification thresholds:");
        for tier in &self.actions {
            match tier.minimum_score {
                Some(minimum) => {
                    let _ = writeln!(
                        out,
                        "- {}+ points: {} ({})",
                        minimum,
                        tier.classification,
                        tier.action.label()
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "- under {} points: {} ({})",
                        self.thresholds.low,
                        tier.classification,
                        tier.action.label()
                    );
                }
            }
        }
        out
    }
}
