use crate::cli::ServeArgs;
use crate::infra::{service_dispatcher, AppState};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use municipal_intel::config::AppConfig;
use municipal_intel::error::AppError;
use municipal_intel::telemetry;
use municipal_intel::DocumentClassifier;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let classifier = DocumentClassifier::new(config.scoring.clone())?;
    let dispatcher = service_dispatcher(&config.automation);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        classifier: Arc::new(classifier),
        dispatcher: Arc::new(dispatcher),
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        keywords = config.scoring.keywords().len(),
        "municipal document intelligence service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
