use chrono::NaiveDate;
use regex::{Captures, Regex};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Finds calendar dates written in the formats municipal agendas use.
///
/// Recognized: `MM/DD/YYYY`, `YYYY-MM-DD` and `Month DD, YYYY` (comma optional).
/// Candidates that look like dates but do not name a real day are dropped.
#[derive(Debug, Clone)]
pub(crate) struct DateDetector {
    slashed: Regex,
    iso: Regex,
    written: Regex,
}

impl DateDetector {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        let written = format!(r"(?i)\b({})\s+(\d{{1,2}}),?\s+(\d{{4}})\b", MONTHS.join("|"));
        Ok(Self {
            slashed: Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b")?,
            iso: Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b")?,
            written: Regex::new(&written)?,
        })
    }

    pub(crate) fn extract(&self, text: &str) -> Vec<NaiveDate> {
        let slashed = self
            .slashed
            .captures_iter(text)
            .filter_map(|caps| ymd(number(&caps, 3)?, number(&caps, 1)?, number(&caps, 2)?));
        let iso = self
            .iso
            .captures_iter(text)
            .filter_map(|caps| ymd(number(&caps, 1)?, number(&caps, 2)?, number(&caps, 3)?));
        let written = self.written.captures_iter(text).filter_map(|caps| {
            let month_name = caps.get(1)?.as_str().to_lowercase();
            let month = MONTHS.iter().position(|name| *name == month_name)? as u32 + 1;
            ymd(number(&caps, 3)?, month, number(&caps, 2)?)
        });

        slashed.chain(iso).chain(written).collect()
    }

    /// True when any date in `text` lies within `window_days` of `reference`, in either direction.
    pub(crate) fn mentions_date_near(
        &self,
        text: &str,
        reference: NaiveDate,
        window_days: i64,
    ) -> bool {
        self.extract(text)
            .into_iter()
            .any(|date| (reference - date).num_days().abs() <= window_days)
    }
}

fn number(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn ymd(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn extracts_every_supported_format() {
        let detector = DateDetector::new().expect("patterns compile");
        let text = "Filed 12/15/2024, heard 2025-01-05, effective February 14, 2025 or March 3 2025.";

        let dates = detector.extract(text);

        assert_eq!(
            dates,
            vec![
                date(2024, 12, 15),
                date(2025, 1, 5),
                date(2025, 2, 14),
                date(2025, 3, 3),
            ]
        );
    }

    #[test]
    fn month_names_are_case_insensitive() {
        let detector = DateDetector::new().expect("patterns compile");

        assert_eq!(
            detector.extract("DATE: DECEMBER 15, 2024"),
            vec![date(2024, 12, 15)]
        );
    }

    #[test]
    fn impossible_dates_are_dropped() {
        let detector = DateDetector::new().expect("patterns compile");

        assert!(detector
            .extract("Continued from 13/45/2024 and 2024-02-30 and February 31, 2024.")
            .is_empty());
    }

    #[test]
    fn window_is_inclusive_in_both_directions() {
        let detector = DateDetector::new().expect("patterns compile");
        let reference = date(2024, 1, 1);

        assert!(detector.mentions_date_near("Hearing on 2024-03-31.", reference, 90));
        assert!(!detector.mentions_date_near("Hearing on 2024-04-01.", reference, 90));
        assert!(detector.mentions_date_near("Adopted 10/03/2023.", reference, 90));
        assert!(!detector.mentions_date_near("Adopted 10/02/2023.", reference, 90));
    }
}
