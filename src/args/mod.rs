//! Argument model and parameter filtering.
//!
//! An intercepted call describes its arguments as a list of [`Argument`]s:
//! plain values, values carrying a request id, inbound requests (logged by
//! remote address only), outbound responses and nulls (never logged). The
//! [`ParameterFilter`] turns that list into the argument text of a log line,
//! honouring an [`ExclusionSet`].

pub mod argument;
pub mod parameter_filter;

pub use argument::{Argument, Correlated, ExclusionSet, RemoteOrigin};
pub use parameter_filter::{FilteredArgs, ParameterFilter};
