//! Log sinks
//!
//! A [`LogSink`] is the destination of rendered log lines, exposing one method
//! per severity channel. Two implementations are provided:
//!
//! - **TracingSink**: forwards lines to the `tracing` facade, attaching the
//!   current request id as a structured `req_id` field
//! - **MemorySink**: thread-safe in-memory recorder, useful for tests and for
//!   inspecting what an interceptor emitted
//!
//! Sinks are shared between every thread that runs intercepted calls, so they
//! must be `Send + Sync`.

pub mod memory_sink;
pub mod tracing_sink;

pub use memory_sink::{LogRecord, MemorySink};
pub use tracing_sink::TracingSink;

use std::sync::Arc;

/// Destination for rendered log lines.
pub trait LogSink: Send + Sync {
    fn trace(&self, message: &str);
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn trace(&self, message: &str) {
        (**self).trace(message)
    }

    fn debug(&self, message: &str) {
        (**self).debug(message)
    }

    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}
