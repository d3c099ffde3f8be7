use crate::classifier::{ClassificationResult, PriorityLevel};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub classification: PriorityLevel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighPriorityEntry {
    pub document_name: String,
    pub score: i32,
    pub reasoning: String,
}

/// Aggregate view over one batch of classification results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationSummary {
    pub total_documents: usize,
    pub distribution: Vec<TierCount>,
    pub average_score: f64,
    pub high_priority_documents: Vec<HighPriorityEntry>,
}

impl ClassificationSummary {
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        let distribution = PriorityLevel::ordered()
            .into_iter()
            .map(|classification| TierCount {
                classification,
                count: results
                    .iter()
                    .filter(|result| result.classification == classification)
                    .count(),
            })
            .collect();

        let average_score = if results.is_empty() {
            0.0
        } else {
            let total: i64 = results.iter().map(|result| i64::from(result.score)).sum();
            total as f64 / results.len() as f64
        };

        let high_priority_documents = results
            .iter()
            .filter(|result| result.classification == PriorityLevel::HighPriority)
            .map(|result| HighPriorityEntry {
                document_name: result.document_name.clone(),
                score: result.score,
                reasoning: result.reasoning.clone(),
            })
            .collect();

        Self {
            total_documents: results.len(),
            distribution,
            average_score,
            high_priority_documents,
        }
    }

    pub fn count(&self, classification: PriorityLevel) -> usize {
        self.distribution
            .iter()
            .find(|entry| entry.classification == classification)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Municipal Document Classification Summary");
        let _ = writeln!(out, "=========================================");
        let _ = writeln!(out, "Total Documents Processed: {}", self.total_documents);
        let _ = writeln!(
            out,
            "High Priority: {}",
            self.count(PriorityLevel::HighPriority)
        );
        let _ = writeln!(
            out,
            "Medium Priority: {}",
            self.count(PriorityLevel::MediumPriority)
        );
        let _ = writeln!(
            out,
            "Low Priority: {}",
            self.count(PriorityLevel::LowPriority)
        );
        let _ = writeln!(out, "Irrelevant: {}", self.count(PriorityLevel::Irrelevant));
        let _ = writeln!(out, "Average Score: {:.1}", self.average_score);
        let _ = writeln!(out);
        let _ = writeln!(out, "High Priority Documents:");
        if self.high_priority_documents.is_empty() {
            let _ = writeln!(out, "- none");
        }
        for doc in &self.high_priority_documents {
            let _ = writeln!(
                out,
                "- {} (Score: {}) - {}",
                doc.document_name, doc.score, doc.reasoning
            );
        }
        out
    }
}
