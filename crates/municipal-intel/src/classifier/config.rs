use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const HIGH_VALUE_KEYWORDS: &[&str] = &[
    "cannabis retail",
    "dispensary license",
    "application window",
    "ordinance approved",
    "licensing program",
    "application period",
    "merit-based selection",
    "conditional use permit approved",
    "second reading",
];

const MEDIUM_VALUE_KEYWORDS: &[&str] = &[
    "public hearing",
    "planning commission",
    "draft ordinance",
    "zoning amendment",
    "social equity",
    "moratorium lifted",
    "cannabis business",
    "study session",
];

const LOW_VALUE_KEYWORDS: &[&str] = &[
    "cannabis",
    "marijuana",
    "dispensary",
    "retail",
    "tax revenue",
    "budget discussion",
    "general mention",
];

const POSITIVE_MODIFIERS: &[&str] = &["approved", "passed", "effective", "final"];
const NEGATIVE_MODIFIERS: &[&str] = &["prohibited", "banned", "rejected"];

fn owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|phrase| phrase.to_string()).collect()
}

/// Point tier a keyword phrase is scored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordTier {
    High,
    Medium,
    Low,
}

impl KeywordTier {
    pub fn ordered() -> [KeywordTier; 3] {
        [KeywordTier::High, KeywordTier::Medium, KeywordTier::Low]
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            KeywordTier::High => "high_value_keywords",
            KeywordTier::Medium => "medium_value_keywords",
            KeywordTier::Low => "low_value_keywords",
        }
    }
}

/// Points awarded per distinct keyword match in each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordWeights {
    pub high: i32,
    pub medium: i32,
    pub low: i32,
}

impl Default for KeywordWeights {
    fn default() -> Self {
        Self {
            high: 10,
            medium: 5,
            low: 2,
        }
    }
}

impl KeywordWeights {
    pub fn for_tier(&self, tier: KeywordTier) -> i32 {
        match tier {
            KeywordTier::High => self.high,
            KeywordTier::Medium => self.medium,
            KeywordTier::Low => self.low,
        }
    }
}

/// Signed deltas applied per distinct context modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierDeltas {
    pub positive: i32,
    pub negative: i32,
}

impl Default for ModifierDeltas {
    fn default() -> Self {
        Self {
            positive: 3,
            negative: -3,
        }
    }
}

/// Minimum score for each priority tier. Scores below `low` are irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub high: i32,
    pub medium: i32,
    pub low: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 70,
            medium: 30,
            low: 10,
        }
    }
}

/// Flat per-document bonuses and the limits used to find headings and dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusSettings {
    pub title_bonus: i32,
    pub date_bonus: i32,
    pub date_window_days: i64,
    pub max_heading_length: usize,
    pub heading_scan_lines: usize,
}

impl Default for BonusSettings {
    fn default() -> Self {
        Self {
            title_bonus: 2,
            date_bonus: 5,
            date_window_days: 90,
            max_heading_length: 100,
            heading_scan_lines: 10,
        }
    }
}

/// User-facing scoring configuration.
///
/// Every field is optional when deserialized; omitted fields keep the built-in
/// municipal cannabis tables so a deployment can override a single list or a
/// single threshold without restating the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub high_value_keywords: Vec<String>,
    pub medium_value_keywords: Vec<String>,
    pub low_value_keywords: Vec<String>,
    pub positive_modifiers: Vec<String>,
    pub negative_modifiers: Vec<String>,
    pub weights: KeywordWeights,
    pub modifier_deltas: ModifierDeltas,
    pub thresholds: Thresholds,
    pub bonuses: BonusSettings,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            high_value_keywords: owned(HIGH_VALUE_KEYWORDS),
            medium_value_keywords: owned(MEDIUM_VALUE_KEYWORDS),
            low_value_keywords: owned(LOW_VALUE_KEYWORDS),
            positive_modifiers: owned(POSITIVE_MODIFIERS),
            negative_modifiers: owned(NEGATIVE_MODIFIERS),
            weights: KeywordWeights::default(),
            modifier_deltas: ModifierDeltas::default(),
            thresholds: Thresholds::default(),
            bonuses: BonusSettings::default(),
        }
    }
}

impl ScoringSettings {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn phrases_for(&self, tier: KeywordTier) -> &[String] {
        match tier {
            KeywordTier::High => &self.high_value_keywords,
            KeywordTier::Medium => &self.medium_value_keywords,
            KeywordTier::Low => &self.low_value_keywords,
        }
    }
}

/// A normalized keyword phrase and the points it is worth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    pub phrase: String,
    pub tier: KeywordTier,
    pub points: i32,
}

/// A normalized modifier phrase and its signed delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierEntry {
    pub phrase: String,
    pub delta: i32,
}

/// Validated, immutable scoring configuration shared by every classification.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    settings: ScoringSettings,
    keywords: Vec<KeywordEntry>,
    modifiers: Vec<ModifierEntry>,
}

impl ScoringConfig {
    /// Validate `settings` and freeze them into a scoring configuration.
    pub fn new(settings: ScoringSettings) -> Result<Self, ConfigurationError> {
        validate(&settings)?;
        Ok(Self::build(settings))
    }

    /// Built-in municipal cannabis tables.
    pub fn standard() -> Self {
        Self::build(ScoringSettings::default())
    }

    fn build(settings: ScoringSettings) -> Self {
        let keywords = KeywordTier::ordered()
            .into_iter()
            .flat_map(|tier| {
                let points = settings.weights.for_tier(tier);
                settings
                    .phrases_for(tier)
                    .iter()
                    .map(move |phrase| KeywordEntry {
                        phrase: normalize(phrase),
                        tier,
                        points,
                    })
            })
            .collect();

        let positive = settings
            .positive_modifiers
            .iter()
            .map(|phrase| ModifierEntry {
                phrase: normalize(phrase),
                delta: settings.modifier_deltas.positive,
            });
        let negative = settings
            .negative_modifiers
            .iter()
            .map(|phrase| ModifierEntry {
                phrase: normalize(phrase),
                delta: settings.modifier_deltas.negative,
            });
        let modifiers = positive.chain(negative).collect();

        Self {
            settings,
            keywords,
            modifiers,
        }
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    /// Keyword entries ordered High, Medium, Low and by listing order within a tier.
    pub fn keywords(&self) -> &[KeywordEntry] {
        &self.keywords
    }

    /// Modifier entries, positive before negative.
    pub fn modifiers(&self) -> &[ModifierEntry] {
        &self.modifiers
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.settings.thresholds
    }

    pub fn bonuses(&self) -> &BonusSettings {
        &self.settings.bonuses
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn normalize(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

/// Raised when scoring configuration is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("{table} contains an empty phrase")]
    EmptyPhrase { table: &'static str },
    #[error("phrase '{phrase}' is listed in both {first} and {second}")]
    OverlappingPhrase {
        phrase: String,
        first: &'static str,
        second: &'static str,
    },
    #[error("{tier:?} keyword weight must be positive (got {weight})")]
    NonPositiveWeight { tier: KeywordTier, weight: i32 },
    #[error("{kind} modifier delta has the wrong sign (got {delta})")]
    ModifierSign { kind: &'static str, delta: i32 },
    #[error("thresholds must descend strictly high > medium > low (got {high}/{medium}/{low})")]
    ThresholdOrder { high: i32, medium: i32, low: i32 },
    #[error("{name} must not be negative (got {value})")]
    NegativeBonus { name: &'static str, value: i64 },
    #[error("scoring tables can reach {extreme}, outside the 32-bit score range")]
    ScoreRange { extreme: i64 },
    #[error("date pattern failed to compile: {0}")]
    DatePattern(String),
}

fn validate(settings: &ScoringSettings) -> Result<(), ConfigurationError> {
    let tables = [
        (
            KeywordTier::High.table_name(),
            settings.high_value_keywords.as_slice(),
        ),
        (
            KeywordTier::Medium.table_name(),
            settings.medium_value_keywords.as_slice(),
        ),
        (
            KeywordTier::Low.table_name(),
            settings.low_value_keywords.as_slice(),
        ),
        ("positive_modifiers", settings.positive_modifiers.as_slice()),
        ("negative_modifiers", settings.negative_modifiers.as_slice()),
    ];

    let mut seen: HashMap<String, &'static str> = HashMap::new();
    for (table, phrases) in tables {
        for phrase in phrases {
            let normalized = normalize(phrase);
            if normalized.is_empty() {
                return Err(ConfigurationError::EmptyPhrase { table });
            }
            if let Some(first) = seen.insert(normalized.clone(), table) {
                return Err(ConfigurationError::OverlappingPhrase {
                    phrase: normalized,
                    first,
                    second: table,
                });
            }
        }
    }

    for tier in KeywordTier::ordered() {
        let weight = settings.weights.for_tier(tier);
        if weight <= 0 {
            return Err(ConfigurationError::NonPositiveWeight { tier, weight });
        }
    }

    let deltas = settings.modifier_deltas;
    if deltas.positive <= 0 {
        return Err(ConfigurationError::ModifierSign {
            kind: "positive",
            delta: deltas.positive,
        });
    }
    if deltas.negative >= 0 {
        return Err(ConfigurationError::ModifierSign {
            kind: "negative",
            delta: deltas.negative,
        });
    }

    let Thresholds { high, medium, low } = settings.thresholds;
    if !(high > medium && medium > low) {
        return Err(ConfigurationError::ThresholdOrder { high, medium, low });
    }

    let bonuses = settings.bonuses;
    for (name, value) in [
        ("title_bonus", i64::from(bonuses.title_bonus)),
        ("date_bonus", i64::from(bonuses.date_bonus)),
        ("date_window_days", bonuses.date_window_days),
    ] {
        if value < 0 {
            return Err(ConfigurationError::NegativeBonus { name, value });
        }
    }

    check_score_range(settings)
}

/// Every phrase counts at most once, so the extremes are bounded by the table sizes.
fn check_score_range(settings: &ScoringSettings) -> Result<(), ConfigurationError> {
    let table_total = |phrases: &[String], points: i32| phrases.len() as i64 * i64::from(points);

    let highest = KeywordTier::ordered()
        .into_iter()
        .map(|tier| table_total(settings.phrases_for(tier), settings.weights.for_tier(tier)))
        .sum::<i64>()
        + table_total(
            &settings.positive_modifiers,
            settings.modifier_deltas.positive,
        )
        + i64::from(settings.bonuses.title_bonus)
        + i64::from(settings.bonuses.date_bonus);
    let lowest = table_total(
        &settings.negative_modifiers,
        settings.modifier_deltas.negative,
    );

    for extreme in [highest, lowest] {
        if i32::try_from(extreme).is_err() {
            return Err(ConfigurationError::ScoreRange { extreme });
        }
    }
    Ok(())
}
