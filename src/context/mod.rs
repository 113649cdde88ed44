//! Correlation context for log lines.
//!
//! This module provides call-scoped state that carries the request identifier
//! from the call that first sees it to every log line emitted later in the same
//! logical unit of work.

pub mod correlation;

pub use correlation::{ContextGuard, CorrelationContext, REQ_ID};
