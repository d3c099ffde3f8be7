use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw document handed to the classifier by an ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Discrete priority tier assigned from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    HighPriority,
    MediumPriority,
    LowPriority,
    Irrelevant,
}

impl PriorityLevel {
    /// Tiers from most to least urgent.
    pub fn ordered() -> [PriorityLevel; 4] {
        [
            PriorityLevel::HighPriority,
            PriorityLevel::MediumPriority,
            PriorityLevel::LowPriority,
            PriorityLevel::Irrelevant,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityLevel::HighPriority => "HIGH_PRIORITY",
            PriorityLevel::MediumPriority => "MEDIUM_PRIORITY",
            PriorityLevel::LowPriority => "LOW_PRIORITY",
            PriorityLevel::Irrelevant => "IRRELEVANT",
        }
    }

    /// Ordinal where a larger value means more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            PriorityLevel::HighPriority => 3,
            PriorityLevel::MediumPriority => 2,
            PriorityLevel::LowPriority => 1,
            PriorityLevel::Irrelevant => 0,
        }
    }

    pub fn recommended_action(&self) -> RecommendedAction {
        match self {
            PriorityLevel::HighPriority => RecommendedAction::ImmediateFollowUp,
            PriorityLevel::MediumPriority => RecommendedAction::WeeklyDigest,
            PriorityLevel::LowPriority => RecommendedAction::LogOnly,
            PriorityLevel::Irrelevant => RecommendedAction::Ignore,
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Downstream handling selected for each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    ImmediateFollowUp,
    WeeklyDigest,
    LogOnly,
    Ignore,
}

impl RecommendedAction {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendedAction::ImmediateFollowUp => "immediate_follow_up",
            RecommendedAction::WeeklyDigest => "weekly_digest",
            RecommendedAction::LogOnly => "log_only",
            RecommendedAction::Ignore => "ignore",
        }
    }
}

/// Context modifier found in a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierMatch {
    pub phrase: String,
    pub delta: i32,
}

/// Outcome of scoring one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub document_name: String,
    pub score: i32,
    pub classification: PriorityLevel,
    pub key_phrases: Vec<String>,
    pub reasoning: String,
    pub modifiers: Vec<ModifierMatch>,
    pub date_bonus_applied: bool,
    pub heading_bonus_applied: bool,
    pub recommended_action: RecommendedAction,
}
