//! Lint configuration (`lacquer.config.json`).
//!
//! A configuration carries the shared [`Settings`] and per-rule entries.
//! Each entry is a severity (`"off"`, `"warn"`, `"error"` or `0`/`1`/`2`) or
//! `[severity, options]`. Rules without an entry keep their recommended
//! state. Everything is validated before any file is linted.

use crate::diagnostic::Severity;
use crate::rule::RuleRegistry;
use crate::rules::builtin_rules;
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "lacquer.config.json";

/// Error raised while loading or applying a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration is not valid JSON or does not match the schema.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule entry names a rule that does not exist.
    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    /// A rule entry has a severity that is not off/warn/error.
    #[error("invalid severity for rule '{rule}': {value}")]
    InvalidSeverity { rule: String, value: String },

    /// A rule's options do not match its schema.
    #[error("invalid options for rule '{rule}': {source}")]
    InvalidOptions {
        rule: &'static str,
        source: serde_json::Error,
    },
}

/// Severity as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSeverity {
    Off,
    Warn,
    Error,
}

impl RuleSeverity {
    fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => match text.as_str() {
                "off" => Some(Self::Off),
                "warn" => Some(Self::Warn),
                "error" => Some(Self::Error),
                _ => None,
            },
            Value::Number(number) => match number.as_u64()? {
                0 => Some(Self::Off),
                1 => Some(Self::Warn),
                2 => Some(Self::Error),
                _ => None,
            },
            _ => None,
        }
    }

    /// Reporting severity, `None` when the rule is off
    #[inline]
    pub fn enabled(self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

/// Top-level lacquer configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Settings shared by all rules.
    #[serde(default)]
    pub settings: Settings,

    /// Rule entries by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, Value>,
}

impl LintConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        // Surface rule errors now rather than on first lint
        config.build_registry()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_json(&text)
    }

    /// Build the rule registry described by this configuration
    pub fn build_registry(&self) -> Result<RuleRegistry, ConfigError> {
        if let Some(unknown) = self
            .rules
            .keys()
            .find(|name| !builtin_rules().iter().any(|f| f.meta.name == name.as_str()))
        {
            return Err(ConfigError::UnknownRule(unknown.clone()));
        }

        let mut registry = RuleRegistry::new();
        for factory in builtin_rules() {
            let name = factory.meta.name;
            let Some(entry) = self.rules.get(name) else {
                if factory.meta.is_recommended() {
                    registry.register(factory.create_default());
                }
                continue;
            };

            let (severity, options) = parse_entry(name, entry)?;
            let Some(severity) = severity.enabled() else {
                continue;
            };
            let rule = factory
                .create(options)
                .map_err(|source| ConfigError::InvalidOptions { rule: name, source })?;
            registry.register_with_severity(rule, severity);
        }
        Ok(registry)
    }
}

fn parse_entry<'v>(
    rule: &str,
    entry: &'v Value,
) -> Result<(RuleSeverity, Option<&'v Value>), ConfigError> {
    let invalid = || ConfigError::InvalidSeverity {
        rule: rule.to_string(),
        value: entry.to_string(),
    };
    match entry {
        Value::Array(items) => match items.as_slice() {
            [severity] => Ok((RuleSeverity::parse(severity).ok_or_else(invalid)?, None)),
            [severity, options] => Ok((
                RuleSeverity::parse(severity).ok_or_else(invalid)?,
                Some(options),
            )),
            _ => Err(invalid()),
        },
        severity => Ok((RuleSeverity::parse(severity).ok_or_else(invalid)?, None)),
    }
}

/// JSON Schema for `lacquer.config.json`.
pub fn config_schema() -> Value {
    let severity = json!({
        "oneOf": [
            { "enum": ["off", "warn", "error"] },
            { "enum": [0, 1, 2] }
        ]
    });
    let component_list = |attribute: &str| {
        json!({
            "type": "array",
            "items": {
                "oneOf": [
                    { "type": "string" },
                    {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            attribute: { "type": "string" }
                        },
                        "required": ["name"],
                        "additionalProperties": false
                    }
                ]
            }
        })
    };

    let mut rules = serde_json::Map::new();
    for factory in builtin_rules() {
        let options: Value =
            serde_json::from_str(factory.meta.schema).unwrap_or_else(|_| json!({ "type": "object" }));
        rules.insert(
            factory.meta.name.to_string(),
            json!({
                "description": factory.meta.description,
                "oneOf": [
                    severity,
                    {
                        "type": "array",
                        "items": [severity, options],
                        "minItems": 1,
                        "maxItems": 2
                    }
                ]
            }),
        );
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Lacquer Configuration",
        "description": "Configuration file for lacquer - JSX linter",
        "type": "object",
        "properties": {
            "$schema": {
                "type": "string",
                "description": "JSON Schema reference for editor autocompletion"
            },
            "settings": {
                "type": "object",
                "properties": {
                    "react": {
                        "type": "object",
                        "properties": {
                            "pragma": { "type": "string", "default": "React" },
                            "fragment": { "type": "string", "default": "Fragment" },
                            "jsxFactory": { "type": ["string", "null"] },
                            "jsxFragmentFactory": { "type": ["string", "null"] }
                        },
                        "additionalProperties": false
                    },
                    "linkComponents": component_list("linkAttribute"),
                    "formComponents": component_list("formAttribute")
                },
                "additionalProperties": false
            },
            "rules": {
                "type": "object",
                "properties": rules,
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
}
