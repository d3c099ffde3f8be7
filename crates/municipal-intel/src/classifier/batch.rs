use super::domain::{ClassificationResult, Document};
use super::DocumentClassifier;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::info;

/// Rejected batch input. Raised before any document in the batch is scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("document at position {position} has an empty name")]
    EmptyName { position: usize },
    #[error("document name '{name}' appears more than once in the batch")]
    DuplicateName { name: String },
}

impl DocumentClassifier {
    /// Classify `(name, text)` pairs, returning results in input order.
    pub fn classify_many<I, N, T>(
        &self,
        documents: I,
    ) -> Result<Vec<ClassificationResult>, InvalidInputError>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let documents: Vec<Document> = documents
            .into_iter()
            .map(|(name, text)| Document::new(name, text))
            .collect();
        self.classify_documents(&documents)
    }

    pub fn classify_documents(
        &self,
        documents: &[Document],
    ) -> Result<Vec<ClassificationResult>, InvalidInputError> {
        self.classify_documents_at(documents, self.reference_date())
    }

    /// Classify a batch against one reference date.
    ///
    /// Documents are scored in parallel; the returned vector follows input order.
    pub fn classify_documents_at(
        &self,
        documents: &[Document],
        reference_date: NaiveDate,
    ) -> Result<Vec<ClassificationResult>, InvalidInputError> {
        validate_names(documents)?;

        let results: Vec<ClassificationResult> = documents
            .par_iter()
            .map(|document| self.classify_document_at(document, reference_date))
            .collect();

        info!(
            documents = results.len(),
            %reference_date,
            "batch classification complete"
        );
        Ok(results)
    }
}

fn validate_names(documents: &[Document]) -> Result<(), InvalidInputError> {
    let mut seen = HashSet::with_capacity(documents.len());
    for (position, document) in documents.iter().enumerate() {
        if document.name.trim().is_empty() {
            return Err(InvalidInputError::EmptyName { position });
        }
        if !seen.insert(document.name.as_str()) {
            return Err(InvalidInputError::DuplicateName {
                name: document.name.clone(),
            });
        }
    }
    Ok(())
}
