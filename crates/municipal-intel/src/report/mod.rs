//! Batch summaries, methodology text and result exports.

mod export;
mod methodology;
mod summary;

pub use export::{export_csv, export_json, write_csv, write_json};
pub use methodology::{Methodology, PhraseGroup, TierAction};
pub use summary::{ClassificationSummary, HighPriorityEntry, TierCount};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV report: {0}")]
    Csv(#[from] csv::Error),
}
