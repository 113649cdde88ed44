//! Severity routing for log lines.
//!
//! This module provides the [`Severity`] levels and the [`SeverityRouter`] that
//! maps a configured severity ordinal onto exactly one channel of a
//! [`LogSink`]. Ordinals follow the usual trace/debug/info/warn/error spacing
//! (0, 10, 20, 30, 40); any other value is routed to `info`.

use crate::sink::LogSink;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRACE_INT: i32 = 0;
pub const DEBUG_INT: i32 = 10;
pub const INFO_INT: i32 = 20;
pub const WARN_INT: i32 = 30;
pub const ERROR_INT: i32 = 40;

/// Log channel a line is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub const fn ordinal(self) -> i32 {
        match self {
            Self::Trace => TRACE_INT,
            Self::Debug => DEBUG_INT,
            Self::Info => INFO_INT,
            Self::Warn => WARN_INT,
            Self::Error => ERROR_INT,
        }
    }

    /// Resolve an ordinal; unrecognized values map to `Info`.
    pub fn from_ordinal(ordinal: i32) -> Self {
        match ordinal {
            TRACE_INT => Self::Trace,
            DEBUG_INT => Self::Debug,
            WARN_INT => Self::Warn,
            ERROR_INT => Self::Error,
            _ => Self::Info,
        }
    }

    /// Parse a level name such as `"debug"` or `"WARN"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Dispatches formatted lines to a sink by severity ordinal.
///
/// # Examples
///
/// ```
/// use logprint::router::{SeverityRouter, Severity, WARN_INT};
/// use logprint::sink::MemorySink;
///
/// let sink = MemorySink::new();
/// let router = SeverityRouter::new(sink.clone());
///
/// router.dispatch(WARN_INT, "disk almost full");
/// router.dispatch(99, "unknown level");
///
/// let records = sink.records();
/// assert_eq!(records[0].severity, Severity::Warn);
/// assert_eq!(records[1].severity, Severity::Info);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeverityRouter<S> {
    sink: S,
}

impl<S: LogSink> SeverityRouter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn dispatch(&self, ordinal: i32, message: &str) {
        match Severity::from_ordinal(ordinal) {
            Severity::Trace => self.sink.trace(message),
            Severity::Debug => self.sink.debug(message),
            Severity::Info => self.sink.info(message),
            Severity::Warn => self.sink.warn(message),
            Severity::Error => self.sink.error(message),
        }
    }
}
