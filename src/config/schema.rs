//! Configuration schema definitions.
//!
//! The router is described entirely by its configuration file: parameter
//! constraints, routes, the in-memory models parameters resolve against,
//! and logging settings.

use serde::{Deserialize, Serialize};

use crate::routing::model::Record;

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Named parameter constraints.
    pub params: Vec<ParamConfig>,

    /// Route definitions, in registration order.
    pub routes: Vec<RouteConfig>,

    /// Models that parameters can be bound to.
    pub models: Vec<ModelConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Parameter definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParamConfig {
    /// Name referenced by `:name` pattern segments.
    pub name: String,

    /// Built-in predicate name (`int`, `slug`, ...).
    pub predicate: Option<String>,

    /// Name of the model values resolve against.
    pub model: Option<String>,

    /// Model field to look values up by (defaults to `url` when the model
    /// publishes one).
    pub field: Option<String>,
}

/// Route definition mapping a pattern to a handler action.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Pattern such as `/posts/:post/edit`.
    pub pattern: String,

    /// Handler identifier.
    pub handler: String,

    /// Action invoked on the handler.
    pub action: String,
}

/// In-memory model definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Unique model name.
    pub name: String,

    /// Records publish a canonical `url` field.
    #[serde(default)]
    pub url_field: bool,

    /// Inline records.
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
