use crate::error::{LogPrintError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::warn;

/// Codec behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Wrap encoded values in an outer object keyed by the type name, and expect
    /// that wrapper when decoding.
    pub wrap_root: bool,
    /// Order object keys lexicographically.
    pub sort_keys: bool,
    /// Drop object fields whose value is null.
    pub omit_nulls: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            wrap_root: false,
            sort_keys: true,
            omit_nulls: true,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wrap_root(mut self, enabled: bool) -> Self {
        self.wrap_root = enabled;
        self
    }

    pub fn with_sort_keys(mut self, enabled: bool) -> Self {
        self.sort_keys = enabled;
        self
    }

    pub fn with_omit_nulls(mut self, enabled: bool) -> Self {
        self.omit_nulls = enabled;
        self
    }
}

/// JSON encoder/decoder with logging-friendly defaults.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Process-wide codec with the default (unwrapped) configuration.
    pub fn shared() -> &'static Codec {
        static SHARED: OnceLock<Codec> = OnceLock::new();
        SHARED.get_or_init(Codec::default)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a value, honouring the configured root wrapping.
    ///
    /// Returns `None` if the value cannot be represented as JSON.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Option<String> {
        self.encode_or_warn(value, self.config.wrap_root)
    }

    /// Encode a value wrapped in `{"<TypeName>": ...}` regardless of configuration.
    pub fn encode_with_root<T: Serialize + ?Sized>(&self, value: &T) -> Option<String> {
        self.encode_or_warn(value, true)
    }

    /// Decode a value, honouring the configured root wrapping.
    ///
    /// Unknown fields in the input are ignored. Returns `None` on malformed input.
    pub fn decode<T: DeserializeOwned>(&self, text: &str) -> Option<T> {
        self.decode_or_warn(text, self.config.wrap_root)
    }

    /// Decode a value that is wrapped in `{"<TypeName>": ...}` regardless of configuration.
    pub fn decode_with_root<T: DeserializeOwned>(&self, text: &str) -> Option<T> {
        self.decode_or_warn(text, true)
    }

    /// Fallible form of [`Codec::encode`].
    pub fn try_encode<T: Serialize + ?Sized>(&self, value: &T, wrap_root: bool) -> Result<String> {
        let value = normalize(serde_json::to_value(value)?, &self.config);
        let value = if wrap_root {
            let mut wrapper = Map::new();
            wrapper.insert(root_name::<T>().to_string(), value);
            Value::Object(wrapper)
        } else {
            value
        };
        Ok(serde_json::to_string(&value)?)
    }

    /// Fallible form of [`Codec::decode`].
    pub fn try_decode<T: DeserializeOwned>(&self, text: &str, unwrap_root: bool) -> Result<T> {
        if !unwrap_root {
            return Ok(serde_json::from_str(text)?);
        }

        let expected = root_name::<T>();
        match serde_json::from_str::<Value>(text)? {
            Value::Object(mut map) if map.len() == 1 => match map.remove(expected) {
                Some(inner) => Ok(serde_json::from_value(inner)?),
                None => Err(LogPrintError::RootError(format!("expected root '{}'", expected))),
            },
            _ => Err(LogPrintError::RootError(format!(
                "expected a single-entry object keyed by '{}'",
                expected
            ))),
        }
    }

    fn encode_or_warn<T: Serialize + ?Sized>(&self, value: &T, wrap_root: bool) -> Option<String> {
        match self.try_encode(value, wrap_root) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, type_name = root_name::<T>(), "Failed to encode value");
                None
            }
        }
    }

    fn decode_or_warn<T: DeserializeOwned>(&self, text: &str, unwrap_root: bool) -> Option<T> {
        match self.try_decode(text, unwrap_root) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, type_name = root_name::<T>(), "Failed to decode value");
                None
            }
        }
    }
}

/// Simple name of a type, without module path or generic parameters.
///
/// `alloc::vec::Vec<my_app::Order>` becomes `Vec`.
pub fn root_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn normalize(value: Value, config: &CodecConfig) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .filter(|(_, v)| !(config.omit_nulls && v.is_null()))
                .map(|(k, v)| (k, normalize(v, config)))
                .collect();
            if config.sort_keys {
                entries.sort_by(|a, b| a.0.cmp(&b.0));
            }
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| normalize(v, config)).collect())
        }
        other => other,
    }
}
