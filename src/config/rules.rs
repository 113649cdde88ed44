//! Per-category severity rules.
//!
//! [`LoggingRules`] maps each [`Category`] to a severity ordinal. Rules are read
//! once (environment, `.env`, or a JSON file) and never change afterwards.

use crate::error::{LogPrintError, Result};
use crate::router::{Severity, DEBUG_INT, INFO_INT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Logical layer an intercepted call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dao,
    Service,
    Controller,
    Api,
    Mapper,
    Task,
    Queue,
    Manager,
    /// Explicitly annotated methods, independent of layer.
    Annotated,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Annotated,
        Category::Dao,
        Category::Service,
        Category::Controller,
        Category::Api,
        Category::Mapper,
        Category::Task,
        Category::Queue,
        Category::Manager,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dao => "dao",
            Self::Service => "service",
            Self::Controller => "controller",
            Self::Api => "api",
            Self::Mapper => "mapper",
            Self::Task => "task",
            Self::Queue => "queue",
            Self::Manager => "manager",
            Self::Annotated => "annotation",
        }
    }

    /// Configuration key holding this category's level, e.g. `logger_dao_level`.
    pub fn config_key(self) -> String {
        format!("logger_{}_level", self.as_str())
    }

    pub fn default_level(self) -> i32 {
        match self {
            Self::Dao => DEBUG_INT,
            _ => INFO_INT,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity ordinal per category.
///
/// Values are kept as raw ordinals; an ordinal that matches no level is routed
/// to `info` at dispatch time.
///
/// # Examples
///
/// ```
/// use logprint::config::{Category, LoggingRules};
///
/// let rules = LoggingRules::from_lookup(|key| match key {
///     "logger_service_level" => Some("warn".to_string()),
///     _ => None,
/// })
/// .unwrap();
///
/// assert_eq!(rules.level_for(Category::Service), 30);
/// assert_eq!(rules.level_for(Category::Dao), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingRules {
    #[serde(rename = "logger_annotation_level")]
    pub annotation: i32,
    #[serde(rename = "logger_dao_level")]
    pub dao: i32,
    #[serde(rename = "logger_service_level")]
    pub service: i32,
    #[serde(rename = "logger_api_level")]
    pub api: i32,
    #[serde(rename = "logger_controller_level")]
    pub controller: i32,
    #[serde(rename = "logger_mapper_level")]
    pub mapper: i32,
    #[serde(rename = "logger_task_level")]
    pub task: i32,
    #[serde(rename = "logger_queue_level")]
    pub queue: i32,
    #[serde(rename = "logger_manager_level")]
    pub manager: i32,
}

impl Default for LoggingRules {
    fn default() -> Self {
        Self {
            annotation: INFO_INT,
            dao: DEBUG_INT,
            service: INFO_INT,
            api: INFO_INT,
            controller: INFO_INT,
            mapper: INFO_INT,
            task: INFO_INT,
            queue: INFO_INT,
            manager: INFO_INT,
        }
    }
}

impl LoggingRules {
    pub fn level_for(&self, category: Category) -> i32 {
        match category {
            Category::Annotated => self.annotation,
            Category::Dao => self.dao,
            Category::Service => self.service,
            Category::Api => self.api,
            Category::Controller => self.controller,
            Category::Mapper => self.mapper,
            Category::Task => self.task,
            Category::Queue => self.queue,
            Category::Manager => self.manager,
        }
    }

    pub fn with_level(mut self, category: Category, level: i32) -> Self {
        let slot = match category {
            Category::Annotated => &mut self.annotation,
            Category::Dao => &mut self.dao,
            Category::Service => &mut self.service,
            Category::Api => &mut self.api,
            Category::Controller => &mut self.controller,
            Category::Mapper => &mut self.mapper,
            Category::Task => &mut self.task,
            Category::Queue => &mut self.queue,
            Category::Manager => &mut self.manager,
        };
        *slot = level;
        self
    }

    /// Build rules from a key lookup, falling back to defaults for missing keys.
    ///
    /// Values may be integer ordinals or level names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rules = Self::default();
        for category in Category::ALL {
            let key = category.config_key();
            if let Some(raw) = lookup(&key) {
                rules = rules.with_level(category, parse_level(&key, &raw)?);
            }
        }
        Ok(rules)
    }

    /// Read rules from process environment variables, after loading `.env` if present.
    ///
    /// Each key is looked up as written (`logger_dao_level`) and then upper-cased
    /// (`LOGGER_DAO_LEVEL`).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| std::env::var(key.to_ascii_uppercase()).ok())
        })
    }

    /// Read rules from a JSON object keyed by the configuration keys.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Process-wide rules, loaded from the environment on first use.
    ///
    /// Invalid values are reported and replaced by the defaults.
    pub fn global() -> &'static LoggingRules {
        static RULES: OnceLock<LoggingRules> = OnceLock::new();
        RULES.get_or_init(|| match Self::from_env() {
            Ok(rules) => {
                debug!(?rules, "Loaded logging rules");
                rules
            }
            Err(e) => {
                warn!(error = %e, "Invalid logging rules, using defaults");
                Self::default()
            }
        })
    }
}

fn parse_level(key: &str, raw: &str) -> Result<i32> {
    let trimmed = raw.trim();
    if let Ok(ordinal) = trimmed.parse::<i32>() {
        return Ok(ordinal);
    }
    Severity::from_name(trimmed)
        .map(Severity::ordinal)
        .ok_or_else(|| LogPrintError::InvalidLevel {
            key: key.to_string(),
            value: raw.to_string(),
        })
}
