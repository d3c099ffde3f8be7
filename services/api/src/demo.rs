use crate::infra::service_dispatcher;
use crate::samples::sample_documents;
use chrono::{NaiveDate, Utc};
use clap::Args;
use municipal_intel::automation::{AutomationDispatcher, InMemorySink};
use municipal_intel::config::AppConfig;
use municipal_intel::error::AppError;
use municipal_intel::ingest::{load_directory, load_file};
use municipal_intel::report::{export_csv, export_json, ClassificationSummary, Methodology};
use municipal_intel::{telemetry, ClassificationResult, DocumentClassifier};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Path to a plain-text document
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Date that document dates are compared against (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) reference_date: Option<NaiveDate>,
    /// Print the full result as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Directory scanned recursively for .txt and .md documents
    #[arg(long)]
    pub(crate) dir: PathBuf,
    /// Date that document dates are compared against (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) reference_date: Option<NaiveDate>,
    /// Write the results as JSON to this path
    #[arg(long)]
    pub(crate) json: Option<PathBuf>,
    /// Write the results as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Run the automation workflows against the configured sinks
    #[arg(long)]
    pub(crate) automate: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date that document dates are compared against (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) reference_date: Option<NaiveDate>,
    /// Print the chat alert payloads raised for high priority documents
    #[arg(long)]
    pub(crate) show_payloads: bool,
    /// Print the scoring methodology after the run
    #[arg(long)]
    pub(crate) methodology: bool,
}

fn command_context() -> Result<(AppConfig, DocumentClassifier), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let classifier = DocumentClassifier::new(config.scoring.clone())?;
    Ok((config, classifier))
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let ClassifyArgs {
        file,
        reference_date,
        json,
    } = args;

    let (_, classifier) = command_context()?;
    let document = load_file(&file)?;
    let reference_date = reference_date.unwrap_or_else(|| classifier.reference_date());
    let result = classifier.classify_document_at(&document, reference_date);

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(payload) => println!("{}", payload),
            Err(err) => println!("Result payload unavailable: {}", err),
        }
    } else {
        render_result(&result, usize::MAX);
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs {
        dir,
        reference_date,
        json,
        csv,
        automate,
    } = args;

    let (config, classifier) = command_context()?;
    let documents = load_directory(&dir)?;
    let reference_date = reference_date.unwrap_or_else(|| classifier.reference_date());
    let results = classifier.classify_documents_at(&documents, reference_date)?;

    println!(
        "Classified {} documents from {} (reference date {})",
        results.len(),
        dir.display(),
        reference_date
    );
    for result in &results {
        render_result(result, 3);
    }
    println!("{}", ClassificationSummary::from_results(&results).render_text());

    let now = Utc::now();
    if let Some(path) = json {
        export_json(&path, &results, now)?;
        println!("Results written to {}", path.display());
    }
    if let Some(path) = csv {
        export_csv(&path, &results)?;
        println!("Results written to {}", path.display());
    }
    if automate {
        let summary = service_dispatcher(&config.automation).dispatch(&results, now)?;
        println!("{}", summary.render_report());
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        reference_date,
        show_payloads,
        methodology,
    } = args;

    let classifier = DocumentClassifier::standard()?;
    let reference_date = reference_date.unwrap_or_else(|| classifier.reference_date());
    let documents = sample_documents();

    println!("Municipal document intelligence demo");
    println!(
        "Processing {} sample documents (reference date {})",
        documents.len(),
        reference_date
    );

    println!("\nStep 1: Document classification");
    let results = classifier.classify_documents_at(&documents, reference_date)?;
    for result in &results {
        render_result(result, 3);
    }

    println!("\nStep 2: Summary report");
    println!("{}", ClassificationSummary::from_results(&results).render_text());

    println!("Step 3: Automation workflows (in-memory delivery)");
    let sink = Arc::new(InMemorySink::default());
    let dispatcher = AutomationDispatcher::new(
        sink.clone(),
        sink.clone(),
        sink.clone(),
        vec!["stakeholders@example.com".to_string()],
    );
    let summary = dispatcher.dispatch(&results, Utc::now())?;

    for alert in sink.alerts()? {
        println!("- Alert raised: {} (score {})", alert.document_name, alert.score);
        if show_payloads {
            match serde_json::to_string_pretty(&alert.slack_payload()) {
                Ok(payload) => println!("{}", payload),
                Err(err) => println!("  Alert payload unavailable: {}", err),
            }
        }
    }
    for digest in sink.digests()? {
        println!("- Digest prepared for {}", digest.recipients.join(", "));
        println!("{}", digest.render_text());
    }
    for entry in sink.log_entries()? {
        println!(
            "- Logged {} low priority documents ({})",
            entry.document_count, entry.action
        );
    }

    println!("\nStep 4: Automation report");
    println!("{}", summary.render_report());

    if methodology {
        println!("{}", Methodology::from_config(classifier.config()).render_text());
    }
    Ok(())
}

fn render_result(result: &ClassificationResult, phrase_limit: usize) {
    println!("[{}] {}", result.classification, result.document_name);
    println!(
        "  Score: {} | Action: {}",
        result.score,
        result.recommended_action.label()
    );
    println!("  Reasoning: {}", result.reasoning);
    if !result.key_phrases.is_empty() {
        let shown: Vec<&str> = result
            .key_phrases
            .iter()
            .take(phrase_limit)
            .map(String::as_str)
            .collect();
        println!("  Key phrases: {}", shown.join(", "));
    }
}
