//! Tier-driven follow-up for classified documents.
//!
//! HIGH documents raise one alert each, MEDIUM documents are collected into a
//! single weekly digest, LOW documents are appended to an audit log and
//! IRRELEVANT documents are dropped. Delivery is abstracted behind
//! [`AlertSink`], [`DigestSink`] and [`LogSink`] so the service can swap
//! transports without touching the routing rules.

mod sinks;

pub use sinks::{InMemorySink, JsonFileLog, TracingSink};

use crate::classifier::{ClassificationResult, PriorityLevel};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;

const ALERT_PHRASE_LIMIT: usize = 5;
const ALERT_ACTION: &str = "IMMEDIATE FOLLOW-UP REQUIRED";
const LOW_PRIORITY_ACTION: &str = "low_priority_log";

/// Immediate notification raised for a HIGH priority document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityAlert {
    pub document_name: String,
    pub score: i32,
    pub reasoning: String,
    pub key_phrases: Vec<String>,
    pub raised_at: DateTime<Utc>,
}

impl PriorityAlert {
    pub fn from_result(result: &ClassificationResult, raised_at: DateTime<Utc>) -> Self {
        Self {
            document_name: result.document_name.clone(),
            score: result.score,
            reasoning: result.reasoning.clone(),
            key_phrases: result
                .key_phrases
                .iter()
                .take(ALERT_PHRASE_LIMIT)
                .cloned()
                .collect(),
            raised_at,
        }
    }

    /// Chat webhook body with one attachment describing the document.
    pub fn slack_payload(&self) -> serde_json::Value {
        json!({
            "text": "HIGH PRIORITY MUNICIPAL DOCUMENT DETECTED",
            "attachments": [{
                "color": "#ff0000",
                "fields": [
                    { "title": "Document", "value": self.document_name, "short": true },
                    { "title": "Score", "value": self.score.to_string(), "short": true },
                    { "title": "Reasoning", "value": self.reasoning, "short": false },
                    { "title": "Key Phrases", "value": self.key_phrases.join(", "), "short": false },
                    { "title": "Recommended Action", "value": ALERT_ACTION, "short": false },
                ],
                "footer": format!("Processed at {}", self.raised_at.format("%Y-%m-%d %H:%M:%S")),
            }],
        })
    }
}

/// Condensed view of a document used by digests and log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBrief {
    pub document_name: String,
    pub score: i32,
    pub reasoning: String,
    pub key_phrases: Vec<String>,
}

impl From<&ClassificationResult> for DocumentBrief {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            document_name: result.document_name.clone(),
            score: result.score,
            reasoning: result.reasoning.clone(),
            key_phrases: result.key_phrases.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyDigest {
    pub subject: String,
    pub issued_on: NaiveDate,
    pub recipients: Vec<String>,
    pub documents: Vec<DocumentBrief>,
}

impl WeeklyDigest {
    pub fn new(issued_on: NaiveDate, recipients: Vec<String>, documents: Vec<DocumentBrief>) -> Self {
        Self {
            subject: format!("Weekly Municipal Document Digest - {}", issued_on.format("%Y-%m-%d")),
            issued_on,
            recipients,
            documents,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.subject);
        let _ = writeln!(out, "Medium priority documents: {}", self.documents.len());
        for doc in &self.documents {
            let _ = writeln!(out);
            let _ = writeln!(out, "{} (Score: {})", doc.document_name, doc.score);
            let _ = writeln!(out, "  Reasoning: {}", doc.reasoning);
            if !doc.key_phrases.is_empty() {
                let _ = writeln!(out, "  Key phrases: {}", doc.key_phrases.join(", "));
            }
            let _ = writeln!(out, "  Recommended action: Monitor and plan");
        }
        out
    }
}

/// One append to the low-priority audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub logged_at: DateTime<Utc>,
    pub action: String,
    pub document_count: usize,
    pub documents: Vec<DocumentBrief>,
}

impl LogEntry {
    pub fn low_priority(logged_at: DateTime<Utc>, documents: Vec<DocumentBrief>) -> Self {
        Self {
            logged_at,
            action: LOW_PRIORITY_ACTION.to_string(),
            document_count: documents.len(),
            documents,
        }
    }
}

pub trait AlertSink: Send + Sync {
    fn send_alert(&self, alert: &PriorityAlert) -> Result<(), DispatchError>;
}

pub trait DigestSink: Send + Sync {
    fn send_digest(&self, digest: &WeeklyDigest) -> Result<(), DispatchError>;
}

pub trait LogSink: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<(), DispatchError>;

    /// Where entries end up, for reports.
    fn target(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("automation transport unavailable: {0}")]
    Transport(String),
    #[error("automation log io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("automation payload could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestReceipt {
    pub subject: String,
    pub recipients: Vec<String>,
    pub document_count: usize,
}

/// What one dispatch run delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationSummary {
    pub executed_at: DateTime<Utc>,
    pub total_documents: usize,
    pub alerts_sent: Vec<String>,
    pub digest: Option<DigestReceipt>,
    pub logged: usize,
    pub log_target: Option<String>,
    pub ignored: usize,
}

impl AutomationSummary {
    pub fn render_report(&self) -> String {
        let medium = self
            .digest
            .as_ref()
            .map(|digest| digest.document_count)
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "Automation Workflow Report");
        let _ = writeln!(out, "==========================");
        let _ = writeln!(
            out,
            "Generated: {}",
            self.executed_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Document Distribution:");
        let _ = writeln!(
            out,
            "- High Priority (Immediate Alerts): {}",
            self.alerts_sent.len()
        );
        let _ = writeln!(out, "- Medium Priority (Weekly Digest): {}", medium);
        let _ = writeln!(out, "- Low Priority (Logged): {}", self.logged);
        let _ = writeln!(out, "- Irrelevant (Ignored): {}", self.ignored);
        let _ = writeln!(out);
        let _ = writeln!(out, "Workflows Executed:");
        if self.alerts_sent.is_empty() && self.digest.is_none() && self.logged == 0 {
            let _ = writeln!(out, "* none");
        }
        if !self.alerts_sent.is_empty() {
            let _ = writeln!(
                out,
                "* {} alerts sent for immediate follow-up",
                self.alerts_sent.len()
            );
        }
        if let Some(digest) = &self.digest {
            let _ = writeln!(
                out,
                "* Weekly digest prepared with {} documents for {}",
                digest.document_count,
                digest.recipients.join(", ")
            );
        }
        if self.logged > 0 {
            let target = self.log_target.as_deref().unwrap_or("log");
            let _ = writeln!(out, "* {} documents logged to {}", self.logged, target);
        }
        out
    }
}

/// Routes classification results to the configured sinks.
#[derive(Clone)]
pub struct AutomationDispatcher {
    alerts: Arc<dyn AlertSink>,
    digests: Arc<dyn DigestSink>,
    log: Arc<dyn LogSink>,
    recipients: Vec<String>,
}

impl AutomationDispatcher {
    pub fn new(
        alerts: Arc<dyn AlertSink>,
        digests: Arc<dyn DigestSink>,
        log: Arc<dyn LogSink>,
        recipients: Vec<String>,
    ) -> Self {
        Self {
            alerts,
            digests,
            log,
            recipients,
        }
    }

    /// Deliver every tier's action for `results`.
    ///
    /// Sinks are only called when their tier has at least one document. The
    /// first delivery failure aborts the run.
    pub fn dispatch(
        &self,
        results: &[ClassificationResult],
        now: DateTime<Utc>,
    ) -> Result<AutomationSummary, DispatchError> {
        let mut alerts_sent = Vec::new();
        let mut medium = Vec::new();
        let mut low = Vec::new();
        let mut ignored = 0;

        for result in results {
            match result.classification {
                PriorityLevel::HighPriority => {
                    let alert = PriorityAlert::from_result(result, now);
                    self.alerts.send_alert(&alert)?;
                    alerts_sent.push(alert.document_name);
                }
                PriorityLevel::MediumPriority => medium.push(DocumentBrief::from(result)),
                PriorityLevel::LowPriority => low.push(DocumentBrief::from(result)),
                PriorityLevel::Irrelevant => ignored += 1,
            }
        }

        let digest = if medium.is_empty() {
            None
        } else {
            let digest = WeeklyDigest::new(now.date_naive(), self.recipients.clone(), medium);
            self.digests.send_digest(&digest)?;
            Some(DigestReceipt {
                subject: digest.subject,
                recipients: digest.recipients,
                document_count: digest.documents.len(),
            })
        };

        let logged = low.len();
        let log_target = if low.is_empty() {
            None
        } else {
            self.log.append(&LogEntry::low_priority(now, low))?;
            Some(self.log.target())
        };

        info!(
            alerts = alerts_sent.len(),
            digest = digest.is_some(),
            logged,
            ignored,
            "automation workflows dispatched"
        );

        Ok(AutomationSummary {
            executed_at: now,
            total_documents: results.len(),
            alerts_sent,
            digest,
            logged,
            log_target,
            ignored,
        })
    }
}
