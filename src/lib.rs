//! Start/end logging for intercepted method calls.
//!
//! Every wrapped call produces a start line and an end line carrying the
//! serialized arguments, the result, the elapsed time and the request id of
//! the current unit of work, at a severity configured per layer.

pub mod args;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod interceptor;
pub mod logging;
pub mod router;
pub mod signature;
pub mod sink;

pub use error::{LogPrintError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::args::{Argument, Correlated, RemoteOrigin};
    pub use crate::codec::Codec;
    pub use crate::config::{Category, LoggingRules};
    pub use crate::context::CorrelationContext;
    pub use crate::error::{LogPrintError, Result};
    pub use crate::interceptor::{CallSite, Interceptor, LogPrint, Origin};
    pub use crate::router::Severity;
    pub use crate::sink::{LogSink, MemorySink, TracingSink};
}
