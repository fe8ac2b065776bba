//! Incoming path matching.
//!
//! # Responsibilities
//! - Select the candidate bucket by segment count
//! - Compare literal segments exactly (case-sensitive)
//! - Evaluate parameter constraints (predicate, then model lookup)
//!
//! # Design Decisions
//! - First match wins, in registration order; no scoring among candidates
//! - A rejected parameter moves on to the next candidate, never errors
//! - Model lookup failures abort matching and propagate unchanged

use serde::Serialize;

use crate::observability::metrics;
use crate::routing::error::{RouterError, RouterResult};
use crate::routing::fields::FieldBindings;
use crate::routing::index::{IndexedRoute, RouteIndex};
use crate::routing::model::{Filter, Record};
use crate::routing::params::{ParamValue, ParameterRegistry, Params};
use crate::routing::segment::{split_path, SegmentToken};
use crate::routing::table::Target;

/// Outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMatch {
    /// Pattern of the route that matched.
    pub pattern: String,
    pub target: Target,
    /// Values bound to the route's parameters.
    pub params: Params,
}

/// Borrowed view over the structures matching needs.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    index: &'a RouteIndex,
    registry: &'a ParameterRegistry,
    fields: &'a FieldBindings,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a RouteIndex, registry: &'a ParameterRegistry, fields: &'a FieldBindings) -> Self {
        Self {
            index,
            registry,
            fields,
        }
    }

    /// Find the first route matching `path`.
    pub fn find(&self, path: &str) -> RouterResult<RouteMatch> {
        let segments = split_path(path);

        let Some(candidates) = self.index.bucket(segments.len()) else {
            tracing::debug!(path = %path, segments = segments.len(), "No routes with this segment count");
            metrics::record_match("not_found");
            return Err(RouterError::NotFound(path.to_string()));
        };

        for route in candidates {
            if let Some(params) = self.test_route(route, &segments)? {
                tracing::debug!(path = %path, pattern = %route.pattern, "Route matched");
                metrics::record_match("matched");
                return Ok(RouteMatch {
                    pattern: route.pattern.clone(),
                    target: route.target.clone(),
                    params,
                });
            }
        }

        tracing::debug!(path = %path, candidates = candidates.len(), "No candidate route matched");
        metrics::record_match("not_found");
        Err(RouterError::NotFound(path.to_string()))
    }

    /// Bind `segments` against `route`, or `None` if any segment is rejected.
    fn test_route(&self, route: &IndexedRoute, segments: &[&str]) -> RouterResult<Option<Params>> {
        let mut params = Params::new();
        for (token, segment) in route.segments.iter().zip(segments) {
            match token {
                SegmentToken::Literal(literal) => {
                    if literal.as_str() != *segment {
                        return Ok(None);
                    }
                }
                SegmentToken::Param(name) => match self.test_param(name, segment)? {
                    Some(value) => {
                        params.insert(name.clone(), value);
                    }
                    None => return Ok(None),
                },
            }
        }
        Ok(Some(params))
    }

    /// Evaluate the constraints registered for `name` against `value`.
    ///
    /// Returns the resolved value (the record, for model-bound parameters)
    /// or `None` when the value is rejected.
    pub fn test_param(&self, name: &str, value: &str) -> RouterResult<Option<ParamValue>> {
        if value.is_empty() {
            return Ok(None);
        }

        let attributes = match self.registry.get(name) {
            Some(attributes) if !attributes.is_empty() => attributes,
            _ => return Ok(Some(ParamValue::from(value))),
        };

        if let Some(predicate) = attributes.predicate() {
            return Ok(predicate(value).then(|| ParamValue::from(value)));
        }

        if attributes.bound_model().is_some() {
            let record = self.resolve_model(name, value)?;
            return Ok(record.filter(|r| !r.is_empty()).map(ParamValue::Record));
        }

        Ok(None)
    }

    /// Look up the record `value` identifies for the model-bound `param`.
    pub fn resolve_model(&self, param: &str, value: &str) -> RouterResult<Option<Record>> {
        let Some(model) = self.registry.get(param).and_then(|a| a.bound_model()) else {
            return Ok(None);
        };
        let Some(field) = self.fields.get(param) else {
            metrics::record_model_lookup("unresolvable");
            return Ok(None);
        };

        let filter = Filter::from([(field.to_string(), value.to_string())]);
        match model.find(&filter, 1) {
            Ok(found) => {
                metrics::record_model_lookup(if found.is_some() { "found" } else { "missing" });
                Ok(found)
            }
            Err(source) => {
                tracing::warn!(param = %param, model = %model.name(), error = %source, "Model lookup failed");
                metrics::record_model_lookup("error");
                Err(RouterError::Model {
                    param: param.to_string(),
                    source,
                })
            }
        }
    }
}
