//! Call signature extraction.
//!
//! Turns a call-site descriptor into the compact `Type.method` label used as the
//! prefix of every log line. Raw descriptors look like
//! `execution(List com.acme.dao.BankTypeMapper$Iface.getMobileBankType(BankTypePo))`;
//! anything that does not match that shape is used verbatim.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Identifies the method an intercepted call targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// Textual descriptor in `execution(<ret> <a.b.Type>.<method>(<params>))` form.
    Raw(String),
    /// Declaring type path and method name.
    Method { type_path: String, method: String },
}

impl Descriptor {
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    pub fn method(type_path: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Method {
            type_path: type_path.into(),
            method: method.into(),
        }
    }

    /// Compact `Type.method` label.
    pub fn label(&self) -> String {
        match self {
            Self::Raw(text) => extract_label(text),
            Self::Method { type_path, method } => {
                let simple = type_path.rsplit('.').next().unwrap_or(type_path);
                format!("{}.{}", simple, method)
            }
        }
    }

    /// Fully qualified declaring type, when it can be determined.
    pub fn declaring_type(&self) -> Option<String> {
        match self {
            Self::Raw(text) => {
                let caps = execution_pattern().captures(text)?;
                Some(caps["path"].trim_end_matches('.').to_string())
            }
            Self::Method { type_path, .. } => Some(type_path.clone()),
        }
    }
}

impl From<&str> for Descriptor {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(text) => write!(f, "{}", text),
            Self::Method { type_path, method } => write!(f, "{}.{}", type_path, method),
        }
    }
}

fn execution_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"execution\([\w$]+\s+(?P<path>(?:[\w$]+\.)*(?P<owner>[\w$]+\.))(?P<method>[\w$]+)\([\w$,]*\)\)",
        )
        .expect("execution pattern is valid")
    })
}

/// Reduce a raw descriptor to `Type.method`.
///
/// Blank or unrecognized descriptors are returned unchanged.
pub fn extract_label(descriptor: &str) -> String {
    if descriptor.trim().is_empty() {
        return descriptor.to_string();
    }

    match execution_pattern().captures(descriptor) {
        Some(caps) => format!("{}{}", &caps["owner"], &caps["method"]),
        None => descriptor.to_string(),
    }
}
