use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use municipal_intel::automation::{AutomationDispatcher, JsonFileLog, TracingSink};
use municipal_intel::config::AutomationConfig;
use municipal_intel::DocumentClassifier;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) classifier: Arc<DocumentClassifier>,
    pub(crate) dispatcher: Arc<AutomationDispatcher>,
}

/// Alerts and digests go to the structured log; LOW documents go to the JSON audit file.
pub(crate) fn service_dispatcher(config: &AutomationConfig) -> AutomationDispatcher {
    AutomationDispatcher::new(
        Arc::new(TracingSink),
        Arc::new(TracingSink),
        Arc::new(JsonFileLog::new(config.log_path.clone())),
        config.digest_recipients.clone(),
    )
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
