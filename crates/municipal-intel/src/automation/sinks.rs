use super::{AlertSink, DigestSink, DispatchError, LogEntry, LogSink, PriorityAlert, WeeklyDigest};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

/// Records every delivery so demos and tests can inspect them.
#[derive(Debug, Default, Clone)]
pub struct InMemorySink {
    alerts: Arc<Mutex<Vec<PriorityAlert>>>,
    digests: Arc<Mutex<Vec<WeeklyDigest>>>,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

fn locked<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DispatchError> {
    mutex
        .lock()
        .map_err(|_| DispatchError::Transport("in-memory sink mutex poisoned".to_string()))
}

impl InMemorySink {
    pub fn alerts(&self) -> Result<Vec<PriorityAlert>, DispatchError> {
        Ok(locked(&self.alerts)?.clone())
    }

    pub fn digests(&self) -> Result<Vec<WeeklyDigest>, DispatchError> {
        Ok(locked(&self.digests)?.clone())
    }

    pub fn log_entries(&self) -> Result<Vec<LogEntry>, DispatchError> {
        Ok(locked(&self.entries)?.clone())
    }
}

impl AlertSink for InMemorySink {
    fn send_alert(&self, alert: &PriorityAlert) -> Result<(), DispatchError> {
        locked(&self.alerts)?.push(alert.clone());
        Ok(())
    }
}

impl DigestSink for InMemorySink {
    fn send_digest(&self, digest: &WeeklyDigest) -> Result<(), DispatchError> {
        locked(&self.digests)?.push(digest.clone());
        Ok(())
    }
}

impl LogSink for InMemorySink {
    fn append(&self, entry: &LogEntry) -> Result<(), DispatchError> {
        locked(&self.entries)?.push(entry.clone());
        Ok(())
    }

    fn target(&self) -> String {
        "memory".to_string()
    }
}

/// Emits alerts and digests as structured log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn send_alert(&self, alert: &PriorityAlert) -> Result<(), DispatchError> {
        let payload = serde_json::to_string(&alert.slack_payload())?;
        warn!(
            document = %alert.document_name,
            score = alert.score,
            %payload,
            "high priority document alert"
        );
        Ok(())
    }
}

impl DigestSink for TracingSink {
    fn send_digest(&self, digest: &WeeklyDigest) -> Result<(), DispatchError> {
        info!(
            subject = %digest.subject,
            recipients = %digest.recipients.join(","),
            documents = digest.documents.len(),
            "weekly digest prepared"
        );
        Ok(())
    }
}

/// Appends entries to a pretty-printed JSON array on disk.
///
/// A missing file starts a fresh array. An unparseable file is moved aside to
/// `<path>.corrupt` before the next append, never overwritten in place.
#[derive(Debug)]
pub struct JsonFileLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unparseable log is preserved.
    pub fn corrupt_path(&self) -> PathBuf {
        let mut raw = self.path.clone().into_os_string();
        raw.push(".corrupt");
        PathBuf::from(raw)
    }

    /// Reads the logged entries, failing with `DispatchError::Serialization` on a corrupt file.
    pub fn entries(&self) -> Result<Vec<LogEntry>, DispatchError> {
        match self.read_raw()? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn read_raw(&self) -> Result<Option<String>, DispatchError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(DispatchError::Io(err)),
        }
    }

    fn entries_for_append(&self) -> Result<Vec<LogEntry>, DispatchError> {
        let Some(raw) = self.read_raw()? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                let backup = self.corrupt_path();
                fs::rename(&self.path, &backup)?;
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %err,
                    "automation log unreadable, moved aside"
                );
                Ok(Vec::new())
            }
        }
    }
}

impl LogSink for JsonFileLog {
    fn append(&self, entry: &LogEntry) -> Result<(), DispatchError> {
        let _guard = locked(&self.write_lock)?;
        let mut entries = self.entries_for_append()?;
        entries.push(entry.clone());
        let raw = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, raw)?;
        info!(
            path = %self.path.display(),
            documents = entry.document_count,
            "low priority documents logged"
        );
        Ok(())
    }

    fn target(&self) -> String {
        self.path.display().to_string()
    }
}
