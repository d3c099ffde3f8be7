use super::config::{BonusSettings, KeywordTier, ScoringConfig};
use super::domain::{Document, ModifierMatch};
use std::collections::HashSet;

pub(crate) struct KeywordScan {
    pub subtotal: i32,
    pub key_phrases: Vec<String>,
}

pub(crate) struct ModifierScan {
    pub subtotal: i32,
    pub matches: Vec<ModifierMatch>,
}

/// Score keyword phrases found in the lowercased body.
///
/// Each configured phrase counts once no matter how often it occurs. Phrases are
/// reported by the byte offset of their first occurrence, falling back to table
/// order when two phrases start at the same offset.
pub(crate) fn scan_keywords(body: &str, config: &ScoringConfig) -> KeywordScan {
    let mut hits: Vec<(usize, usize, &str, i32)> = config
        .keywords()
        .iter()
        .enumerate()
        .filter_map(|(order, entry)| {
            body.find(entry.phrase.as_str())
                .map(|offset| (offset, order, entry.phrase.as_str(), entry.points))
        })
        .collect();
    hits.sort_by_key(|(offset, order, _, _)| (*offset, *order));

    let mut seen = HashSet::new();
    let mut subtotal = 0;
    let mut key_phrases = Vec::with_capacity(hits.len());
    for (_, _, phrase, points) in hits {
        if seen.insert(phrase) {
            subtotal += points;
            key_phrases.push(phrase.to_string());
        }
    }

    KeywordScan {
        subtotal,
        key_phrases,
    }
}

pub(crate) fn scan_modifiers(body: &str, config: &ScoringConfig) -> ModifierScan {
    let mut hits: Vec<(usize, usize, &str, i32)> = config
        .modifiers()
        .iter()
        .enumerate()
        .filter_map(|(order, entry)| {
            body.find(entry.phrase.as_str())
                .map(|offset| (offset, order, entry.phrase.as_str(), entry.delta))
        })
        .collect();
    hits.sort_by_key(|(offset, order, _, _)| (*offset, *order));

    let mut seen = HashSet::new();
    let mut subtotal = 0;
    let mut matches = Vec::with_capacity(hits.len());
    for (_, _, phrase, delta) in hits {
        if seen.insert(phrase) {
            subtotal += delta;
            matches.push(ModifierMatch {
                phrase: phrase.to_string(),
                delta,
            });
        }
    }

    ModifierScan { subtotal, matches }
}

/// True when a High or Medium keyword appears in the document's heading region.
///
/// An empty body earns no heading bonus, whatever the document is named.
pub(crate) fn heading_matches(document: &Document, config: &ScoringConfig) -> bool {
    if document.text.trim().is_empty() {
        return false;
    }

    let mut candidates = vec![document.name.to_lowercase()];
    if let Some(title) = &document.title {
        candidates.push(title.to_lowercase());
    }
    candidates.extend(
        body_headings(&document.text, config.bonuses())
            .into_iter()
            .map(str::to_lowercase),
    );

    candidates.iter().any(|candidate| {
        config
            .keywords()
            .iter()
            .filter(|entry| entry.tier != KeywordTier::Low)
            .any(|entry| candidate.contains(entry.phrase.as_str()))
    })
}

/// Heading lines taken from the body itself.
///
/// A body with a single non-empty line has no heading distinct from its text.
/// Otherwise the first non-empty line is a heading, as is any all-uppercase line
/// within the first `heading_scan_lines` lines. Lines longer than
/// `max_heading_length` characters are treated as prose.
pub(crate) fn body_headings<'a>(text: &'a str, bonuses: &BonusSettings) -> Vec<&'a str> {
    let mut non_empty = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let Some(first) = non_empty.next() else {
        return Vec::new();
    };
    if non_empty.next().is_none() {
        return Vec::new();
    }

    let mut headings = vec![first];
    headings.extend(
        text.lines()
            .take(bonuses.heading_scan_lines)
            .map(str::trim)
            .filter(|line| *line != first && is_emphasized(line)),
    );
    headings.retain(|line| line.chars().count() <= bonuses.max_heading_length);
    headings
}

fn is_emphasized(line: &str) -> bool {
    let mut letters = line.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| !c.is_lowercase())
}
