pub mod automation;
pub mod classifier;
pub mod config;
pub mod error;
pub mod ingest;
pub mod report;
pub mod telemetry;

pub use classifier::{
    ClassificationResult, Document, DocumentClassifier, PriorityLevel, ScoringConfig,
    ScoringSettings,
};
