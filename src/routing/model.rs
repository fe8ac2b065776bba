//! Backing data models for parameter resolution.
//!
//! # Responsibilities
//! - Define the `Model` capability the router consumes
//! - Provide the `Record` type returned by lookups
//! - Provide an in-memory model for configuration-defined data
//!
//! # Design Decisions
//! - Models declare the URL-field capability explicitly; nothing is inferred
//! - Lookup errors belong to the model and are passed through untouched

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name used by models that publish a canonical URL slug.
pub const URL_FIELD: &str = "url";

/// Equality filter passed to `Model::find`.
pub type Filter = BTreeMap<String, String>;

/// Error raised by a model lookup.
pub type ModelError = Box<dyn std::error::Error + Send + Sync>;

/// A data source that route parameters can be resolved against.
pub trait Model: Send + Sync + fmt::Debug {
    /// Name used in logs and configuration.
    fn name(&self) -> &str;

    /// Find the first record matching every filter entry.
    fn find(&self, filter: &Filter, limit: usize) -> Result<Option<Record>, ModelError>;

    /// Whether records publish a canonical [`URL_FIELD`].
    fn has_url_field(&self) -> bool {
        false
    }
}

/// A single model record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field value rendered as a path segment.
    ///
    /// Strings are returned verbatim, numbers and booleans via `to_string`.
    /// Null, arrays and objects have no segment form.
    pub fn field_text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Model backed by a fixed list of records.
#[derive(Debug, Clone)]
pub struct MemoryModel {
    name: String,
    url_field: bool,
    records: Vec<Record>,
}

impl MemoryModel {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            url_field: false,
            records,
        }
    }

    /// Declare that records carry a canonical `url` field.
    pub fn with_url_field(mut self) -> Self {
        self.url_field = true;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl Model for MemoryModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, filter: &Filter, limit: usize) -> Result<Option<Record>, ModelError> {
        if limit == 0 {
            return Ok(None);
        }
        let found = self.records.iter().find(|record| {
            filter
                .iter()
                .all(|(field, expected)| record.field_text(field).as_deref() == Some(expected.as_str()))
        });
        Ok(found.cloned())
    }

    fn has_url_field(&self) -> bool {
        self.url_field
    }
}
