use crate::infra::{deserialize_optional_date, AppState};
use crate::samples::sample_documents;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{NaiveDate, Utc};
use municipal_intel::automation::AutomationSummary;
use municipal_intel::error::AppError;
use municipal_intel::report::{ClassificationSummary, Methodology};
use municipal_intel::{ClassificationResult, Document};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyRequest {
    pub(crate) document_name: String,
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) reference_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    pub(crate) documents: Vec<Document>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) reference_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchResponse {
    pub(crate) results: Vec<ClassificationResult>,
    pub(crate) summary: ClassificationSummary,
    pub(crate) automation: AutomationSummary,
}

#[derive(Debug, Serialize)]
pub(crate) struct MethodologyResponse {
    #[serde(flatten)]
    pub(crate) methodology: Methodology,
    pub(crate) explanation: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SamplesResponse {
    pub(crate) documents: Vec<Document>,
    pub(crate) results: Vec<ClassificationResult>,
    pub(crate) summary: ClassificationSummary,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/classify", post(classify_endpoint))
        .route("/api/v1/classify/batch", post(batch_endpoint))
        .route("/api/v1/methodology", get(methodology_endpoint))
        .route("/api/v1/samples", get(samples_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn classify_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ClassifyRequest>,
) -> Json<ClassificationResult> {
    let ClassifyRequest {
        document_name,
        text,
        title,
        reference_date,
    } = payload;

    let mut document = Document::new(document_name, text);
    document.title = title;
    let reference_date = reference_date.unwrap_or_else(|| state.classifier.reference_date());

    Json(
        state
            .classifier
            .classify_document_at(&document, reference_date),
    )
}

/// Scoring and sink delivery are synchronous, so they run off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| AppError::Task(err.to_string()))?
}

pub(crate) async fn batch_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let BatchRequest {
        documents,
        reference_date,
    } = payload;

    let classifier = state.classifier.clone();
    let dispatcher = state.dispatcher.clone();
    let (results, automation) = run_blocking(move || {
        let reference_date = reference_date.unwrap_or_else(|| classifier.reference_date());
        let results = classifier.classify_documents_at(&documents, reference_date)?;
        let automation = dispatcher.dispatch(&results, Utc::now())?;
        Ok((results, automation))
    })
    .await?;
    let summary = ClassificationSummary::from_results(&results);

    info!(
        documents = results.len(),
        alerts = automation.alerts_sent.len(),
        "batch request processed"
    );

    Ok(Json(BatchResponse {
        results,
        summary,
        automation,
    }))
}

pub(crate) async fn methodology_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<MethodologyResponse> {
    let methodology = Methodology::from_config(state.classifier.config());
    let explanation = methodology.render_text();
    Json(MethodologyResponse {
        methodology,
        explanation,
    })
}

pub(crate) async fn samples_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<SamplesResponse>, AppError> {
    let classifier = state.classifier.clone();
    let (documents, results) = run_blocking(move || {
        let documents = sample_documents();
        let results = classifier.classify_documents(&documents)?;
        Ok((documents, results))
    })
    .await?;
    let summary = ClassificationSummary::from_results(&results);
    Ok(Json(SamplesResponse {
        documents,
        results,
        summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use municipal_intel::automation::{AutomationDispatcher, InMemorySink, JsonFileLog, TracingSink};
    use municipal_intel::DocumentClassifier;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(sink: &Arc<InMemorySink>) -> Router {
        app_with(AutomationDispatcher::new(
            sink.clone(),
            sink.clone(),
            sink.clone(),
            vec!["clerk@city.gov".to_string()],
        ))
    }

    fn app_with(dispatcher: AutomationDispatcher) -> Router {
        let classifier = DocumentClassifier::standard()
            .expect("standard classifier builds")
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 2, 15).expect("valid date"));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            classifier: Arc::new(classifier),
            dispatcher: Arc::new(dispatcher),
        };
        router().layer(Extension(state))
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.expect("request handled");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("read body");
        let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn classify_endpoint_scores_one_document() {
        let sink = Arc::new(InMemorySink::default());
        let request = post_json(
            "/api/v1/classify",
            json!({
                "document_name": "council-minutes",
                "text": "The city council held a public hearing on the draft ordinance."
            }),
        );

        let (status, body) = call(test_app(&sink), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 10);
        assert_eq!(body["classification"], "LOW_PRIORITY");
        assert_eq!(body["recommended_action"], "log_only");
    }

    #[tokio::test]
    async fn classify_endpoint_honors_reference_date() {
        let sink = Arc::new(InMemorySink::default());
        let request = post_json(
            "/api/v1/classify",
            json!({
                "document_name": "deadline",
                "text": "Application period closes 2025-01-31.",
                "reference_date": "2025-01-10"
            }),
        );

        let (_, body) = call(test_app(&sink), request).await;

        assert_eq!(body["score"], 15);
        assert_eq!(body["date_bonus_applied"], true);
    }

    #[tokio::test]
    async fn batch_endpoint_returns_summary_and_dispatches() {
        let sink = Arc::new(InMemorySink::default());
        let request = post_json(
            "/api/v1/classify/batch",
            json!({
                "documents": [
                    { "name": "hearing", "text": "Public hearing on the draft ordinance." },
                    { "name": "parks", "text": "Park maintenance schedule." }
                ]
            }),
        );

        let (status, body) = call(test_app(&sink), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["summary"]["total_documents"], 2);
        assert_eq!(body["automation"]["logged"], 1);
        assert_eq!(body["automation"]["ignored"], 1);
        assert_eq!(sink.log_entries().expect("log readable").len(), 1);
    }

    #[tokio::test]
    async fn batch_endpoint_writes_file_log_from_worker_thread() {
        let path = std::env::temp_dir().join(format!(
            "municipal-intel-api-{}-batch-log.json",
            std::process::id()
        ));
        std::fs::remove_file(&path).ok();
        let app = app_with(AutomationDispatcher::new(
            Arc::new(TracingSink),
            Arc::new(TracingSink),
            Arc::new(JsonFileLog::new(&path)),
            vec!["clerk@city.gov".to_string()],
        ));
        let request = post_json(
            "/api/v1/classify/batch",
            json!({
                "documents": [
                    { "name": "hearing", "text": "Public hearing on the draft ordinance." },
                    { "name": "study", "text": "Planning commission study session." }
                ]
            }),
        );

        let (status, body) = call(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["automation"]["logged"], 2);
        assert_eq!(JsonFileLog::new(&path).entries().expect("log written").len(), 1);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn batch_endpoint_rejects_duplicate_names() {
        let sink = Arc::new(InMemorySink::default());
        let request = post_json(
            "/api/v1/classify/batch",
            json!({
                "documents": [
                    { "name": "minutes", "text": "Study session." },
                    { "name": "minutes", "text": "Public hearing." }
                ]
            }),
        );

        let (status, body) = call(test_app(&sink), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("minutes"));
        assert!(sink.log_entries().expect("log readable").is_empty());
    }

    #[tokio::test]
    async fn methodology_endpoint_describes_thresholds() {
        let sink = Arc::new(InMemorySink::default());
        let request = Request::builder()
            .uri("/api/v1/methodology")
            .body(Body::empty())
            .expect("request builds");

        let (status, body) = call(test_app(&sink), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["thresholds"]["high"], 70);
        assert!(body["explanation"]
            .as_str()
            .expect("explanation text")
            .contains("HIGH_PRIORITY"));
    }

    #[tokio::test]
    async fn samples_endpoint_classifies_builtin_documents() {
        let sink = Arc::new(InMemorySink::default());
        let request = Request::builder()
            .uri("/api/v1/samples")
            .body(Body::empty())
            .expect("request builds");

        let (status, body) = call(test_app(&sink), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["documents"].as_array().map(Vec::len),
            body["results"].as_array().map(Vec::len)
        );
    }

    #[tokio::test]
    async fn health_and_readiness_report_ok() {
        let sink = Arc::new(InMemorySink::default());
        let health = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request builds");
        let ready = Request::builder()
            .uri("/ready")
            .body(Body::empty())
            .expect("request builds");

        let (health_status, _) = call(test_app(&sink), health).await;
        let (ready_status, ready_body) = call(test_app(&sink), ready).await;

        assert_eq!(health_status, StatusCode::OK);
        assert_eq!(ready_status, StatusCode::OK);
        assert_eq!(ready_body["status"], "ready");
    }
}
