use super::ReportError;
use crate::classifier::ClassificationResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
struct ExportEnvelope<'a> {
    generated_at: DateTime<Utc>,
    document_count: usize,
    results: &'a [ClassificationResult],
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    document_name: &'a str,
    classification: &'static str,
    score: i32,
    recommended_action: &'static str,
    key_phrases: String,
    date_bonus_applied: bool,
    heading_bonus_applied: bool,
    reasoning: &'a str,
}

/// Pretty JSON object holding the results and when they were exported.
pub fn write_json<W: Write>(
    writer: W,
    results: &[ClassificationResult],
    generated_at: DateTime<Utc>,
) -> Result<(), ReportError> {
    let envelope = ExportEnvelope {
        generated_at,
        document_count: results.len(),
        results,
    };
    serde_json::to_writer_pretty(writer, &envelope)?;
    Ok(())
}

/// One CSV row per result; key phrases are joined with `; `.
pub fn write_csv<W: Write>(writer: W, results: &[ClassificationResult]) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(CsvRow {
            document_name: &result.document_name,
            classification: result.classification.label(),
            score: result.score,
            recommended_action: result.recommended_action.label(),
            key_phrases: result.key_phrases.join("; "),
            date_bonus_applied: result.date_bonus_applied,
            heading_bonus_applied: result.heading_bonus_applied,
            reasoning: &result.reasoning,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_json(
    path: impl AsRef<Path>,
    results: &[ClassificationResult],
    generated_at: DateTime<Utc>,
) -> Result<(), ReportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, results, generated_at)?;
    writer.flush()?;
    Ok(())
}

pub fn export_csv(path: impl AsRef<Path>, results: &[ClassificationResult]) -> Result<(), ReportError> {
    write_csv(File::create(path)?, results)
}
