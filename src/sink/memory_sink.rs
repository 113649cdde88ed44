//! In-memory log recording
//!
//! This module provides a thread-safe sink that keeps every line it receives,
//! with support for filtering by severity, taking the last N lines, and an
//! optional callback fired on each recorded line.

use super::LogSink;
use crate::context::CorrelationContext;
use crate::router::Severity;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

/// Type alias for record callback functions
pub type RecordCallback = Arc<dyn Fn(&LogRecord) + Send + Sync>;

/// One line received by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// When the line was recorded
    pub timestamp: DateTime<Utc>,
    /// Channel the line was written to
    pub severity: Severity,
    /// The rendered line
    pub message: String,
    /// Request id bound in the caller's correlation context, if any
    pub request_id: Option<String>,
}

/// Thread-safe recorder of log lines.
///
/// Clones share the same storage, so a clone handed to an interceptor can be
/// inspected through the original.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
    on_record: Option<RecordCallback>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that invokes `callback` for every line before storing it.
    pub fn with_callback(callback: RecordCallback) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            on_record: Some(callback),
        }
    }

    fn record(&self, severity: Severity, message: &str) {
        let record = LogRecord {
            timestamp: Utc::now(),
            severity,
            message: message.to_string(),
            request_id: CorrelationContext::current().request_id(),
        };

        if let Some(callback) = &self.on_record {
            callback(&record);
        }

        self.lock().push(record);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All recorded lines, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Message text of all recorded lines, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    /// Messages recorded at the given severity.
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.severity == severity)
            .map(|r| r.message.clone())
            .collect()
    }

    /// The last `n` records, oldest first.
    pub fn last_n(&self, n: usize) -> Vec<LogRecord> {
        let records = self.lock();
        let start_idx = records.len().saturating_sub(n);
        records[start_idx..].to_vec()
    }

    /// Count lines whose message contains `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lock().iter().filter(|r| r.message.contains(needle)).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl std::fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySink")
            .field("len", &self.len())
            .field("has_callback", &self.on_record.is_some())
            .finish()
    }
}

impl LogSink for MemorySink {
    fn trace(&self, message: &str) {
        self.record(Severity::Trace, message);
    }

    fn debug(&self, message: &str) {
        self.record(Severity::Debug, message);
    }

    fn info(&self, message: &str) {
        self.record(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(Severity::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(Severity::Error, message);
    }
}
