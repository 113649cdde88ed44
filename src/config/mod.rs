//! Logging configuration.
//!
//! Severity levels per category ([`LoggingRules`]) and the structural patterns
//! that assign a declaring type to a category ([`CategoryMatcher`]).

pub mod matcher;
pub mod rules;

pub use matcher::{CategoryMatcher, SegmentRule};
pub use rules::{Category, LoggingRules};
