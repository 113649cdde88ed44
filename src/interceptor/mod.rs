//! Invocation interception
//!
//! The interceptor wraps a call with a start line and an end line, written at
//! the severity configured for the call's category.
//!
//! # Architecture
//!
//! - **CallSite**: what is being called (descriptor), with which arguments, and
//!   whether the method carries a [`LogPrint`] marker or is suppressed
//! - **Origin**: why the call is logged, either its layer or its marker
//! - **Interceptor**: runs the call, binding the request id, filtering
//!   arguments and routing both lines to the sink
//!
//! # Usage Example
//!
//! ```rust
//! use logprint::args::Argument;
//! use logprint::config::LoggingRules;
//! use logprint::interceptor::{CallSite, Interceptor, LogPrint};
//! use logprint::sink::MemorySink;
//!
//! let sink = MemorySink::new();
//! let interceptor = Interceptor::with_sink(LoggingRules::default(), sink.clone());
//!
//! let password = "hunter2";
//! let user = "alice";
//! let site = CallSite::method("com.acme.auth.Login", "check")
//!     .arg(Argument::value(password))
//!     .arg(Argument::value(user))
//!     .annotated(LogPrint::new().except([0]));
//!
//! let ok: Result<bool, ()> = interceptor.intercept_matched(&site, || Ok(true));
//! assert_eq!(ok, Ok(true));
//! assert!(sink.messages().iter().all(|line| !line.contains("hunter2")));
//! ```
//!
//! # End Lines
//!
//! The end line is written from a drop guard, so it appears exactly once
//! whether the call returns `Ok`, returns `Err`, panics, or (for async calls)
//! is cancelled. Only an `Ok` value that does not encode to `null` is logged as
//! the result.

pub mod call_site;
pub mod invocation;
pub mod line;

pub use call_site::{CallSite, LogPrint, Origin};
pub use invocation::Interceptor;
