//! Parameter definitions and bound values.
//!
//! # Responsibilities
//! - Store named parameter attributes (predicate, model, field)
//! - Provide the built-in predicates available to configuration
//! - Represent values bound by matching or supplied for URL building

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::routing::model::{Model, Record};

/// Predicate deciding whether a raw segment is acceptable.
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Constraints attached to a named parameter.
#[derive(Clone, Default)]
pub struct ParamAttributes {
    predicate: Option<Predicate>,
    model: Option<Arc<dyn Model>>,
    field: Option<String>,
}

impl ParamAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept values for which `predicate` returns true.
    pub fn matching<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Resolve values to records of `model`.
    pub fn model(mut self, model: Arc<dyn Model>) -> Self {
        self.model = Some(model);
        self
    }

    /// Look up model records by `field` instead of the model's URL field.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn bound_model(&self) -> Option<&Arc<dyn Model>> {
        self.model.as_ref()
    }

    pub fn explicit_field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// True when no attribute is set; such a parameter accepts anything.
    pub fn is_empty(&self) -> bool {
        self.predicate.is_none() && self.model.is_none() && self.field.is_none()
    }
}

impl fmt::Debug for ParamAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamAttributes")
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .field("model", &self.model.as_ref().map(|m| m.name().to_string()))
            .field("field", &self.field)
            .finish()
    }
}

/// Registered parameters by name.
#[derive(Debug, Clone, Default)]
pub struct ParameterRegistry {
    params: HashMap<String, ParamAttributes>,
}

impl ParameterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the attributes of `name`.
    pub fn insert(&mut self, name: impl Into<String>, attributes: ParamAttributes) {
        self.params.insert(name.into(), attributes);
    }

    pub fn get(&self, name: &str) -> Option<&ParamAttributes> {
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamAttributes)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Named predicates usable from configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinPredicate {
    /// Any non-empty segment.
    Any,
    /// Signed 64-bit integer.
    Int,
    /// Unsigned 64-bit integer.
    Uint,
    /// ASCII letters only.
    Alpha,
    /// ASCII letters and digits.
    Alnum,
    /// Lowercase letters, digits and inner hyphens.
    Slug,
    /// Hyphenated UUID (8-4-4-4-12 hex digits).
    Uuid,
}

impl BuiltinPredicate {
    pub const NAMES: [&'static str; 7] = ["any", "int", "uint", "alpha", "alnum", "slug", "uuid"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "any" => Some(Self::Any),
            "int" => Some(Self::Int),
            "uint" => Some(Self::Uint),
            "alpha" => Some(Self::Alpha),
            "alnum" => Some(Self::Alnum),
            "slug" => Some(Self::Slug),
            "uuid" => Some(Self::Uuid),
            _ => None,
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Any => !value.is_empty(),
            Self::Int => value.parse::<i64>().is_ok(),
            Self::Uint => value.parse::<u64>().is_ok(),
            Self::Alpha => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
            Self::Alnum => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()),
            Self::Slug => is_slug(value),
            Self::Uuid => is_uuid(value),
        }
    }
}

fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn is_uuid(s: &str) -> bool {
    let parts: Vec<_> = s.split('-').collect();
    let lens = [8, 4, 4, 4, 12];
    parts.len() == lens.len()
        && parts
            .iter()
            .zip(lens)
            .all(|(p, len)| p.len() == len && p.chars().all(|c| c.is_ascii_hexdigit()))
}

/// A parameter value: raw text, or a record resolved through a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Raw(String),
    Record(Record),
}

impl ParamValue {
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ParamValue::Raw(s) => Some(s),
            ParamValue::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            ParamValue::Record(r) => Some(r),
            ParamValue::Raw(_) => None,
        }
    }

    /// Empty values never satisfy a parameter segment.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Raw(s) => s.is_empty(),
            ParamValue::Record(r) => r.is_empty(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Raw(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Raw(s)
    }
}

impl From<Record> for ParamValue {
    fn from(r: Record) -> Self {
        ParamValue::Record(r)
    }
}

/// Parameter values keyed by name.
pub type Params = BTreeMap<String, ParamValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_predicates() {
        assert!(BuiltinPredicate::Int.matches("-42"));
        assert!(!BuiltinPredicate::Uint.matches("-42"));
        assert!(BuiltinPredicate::Uint.matches("42"));
        assert!(BuiltinPredicate::Alpha.matches("abc"));
        assert!(!BuiltinPredicate::Alpha.matches("abc1"));
        assert!(BuiltinPredicate::Alnum.matches("abc1"));
        assert!(BuiltinPredicate::Slug.matches("hello-world-2"));
        assert!(!BuiltinPredicate::Slug.matches("-hello"));
        assert!(!BuiltinPredicate::Slug.matches("Hello"));
        assert!(BuiltinPredicate::Uuid.matches("67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(!BuiltinPredicate::Uuid.matches("67e55044-10b1-426f-9247"));
    }

    #[test]
    fn test_every_name_resolves() {
        for name in BuiltinPredicate::NAMES {
            assert!(BuiltinPredicate::from_name(name).is_some(), "{name}");
        }
        assert!(BuiltinPredicate::from_name("regex").is_none());
    }

    #[test]
    fn test_attributes_emptiness() {
        assert!(ParamAttributes::new().is_empty());
        assert!(!ParamAttributes::new().field("slug").is_empty());
        assert!(!ParamAttributes::new().matching(|v| v == "x").is_empty());
    }

    #[test]
    fn test_param_value_serializes_untagged() {
        let raw = serde_json::to_value(ParamValue::from("12")).unwrap();
        assert_eq!(raw, serde_json::json!("12"));

        let record = serde_json::to_value(ParamValue::from(Record::new().with("id", 3))).unwrap();
        assert_eq!(record, serde_json::json!({ "id": 3 }));
    }
}
