//! URL building from parameter values.
//!
//! # Responsibilities
//! - Pick the route binding the most supplied parameters (best match)
//! - Build a path from an explicitly selected pattern
//! - Substitute values, projecting bound fields off model records
//!
//! # Design Decisions
//! - Only presence is checked; predicates and models are not re-evaluated
//! - Ties keep the first route seen: ascending segment count, then
//!   registration order
//! - Raw values for field-bound parameters are emitted as given

use crate::observability::metrics;
use crate::routing::error::{RouterError, RouterResult};
use crate::routing::fields::{FieldBindings, RESERVED_PARAM};
use crate::routing::index::{IndexedRoute, RouteIndex};
use crate::routing::params::{ParamValue, Params};
use crate::routing::segment::{tokenize, SegmentToken, SEPARATOR};

/// Borrowed view over the structures URL building needs.
#[derive(Debug, Clone, Copy)]
pub struct ReverseResolver<'a> {
    index: &'a RouteIndex,
    fields: &'a FieldBindings,
}

impl<'a> ReverseResolver<'a> {
    pub fn new(index: &'a RouteIndex, fields: &'a FieldBindings) -> Self {
        Self { index, fields }
    }

    /// Build a path for `params`.
    ///
    /// A `route` entry selects that pattern directly and must be raw text;
    /// otherwise the best satisfiable route in the index is used.
    pub fn build_url(&self, params: &Params) -> RouterResult<String> {
        if let Some(selected) = params.get(RESERVED_PARAM) {
            let url = self.build_explicit(selected, params);
            metrics::record_url_built("explicit", if url.is_ok() { "built" } else { "error" });
            return url;
        }

        let Some(route) = self.best_route(params) else {
            tracing::debug!(params = ?params.keys().collect::<Vec<_>>(), "No satisfiable route");
            metrics::record_url_built("best_match", "not_found");
            return Err(RouterError::NotFound(describe(params)));
        };

        tracing::debug!(pattern = %route.pattern, "Building URL from best route");
        let url = self.substitute(&route.segments, params, false);
        metrics::record_url_built("best_match", if url.is_ok() { "built" } else { "error" });
        url
    }

    /// The satisfiable route binding the most parameters.
    ///
    /// Routes without parameters bind nothing and are never selected.
    pub fn best_route(&self, params: &Params) -> Option<&'a IndexedRoute> {
        let mut best: Option<&'a IndexedRoute> = None;
        let mut best_count = 0;
        for route in self.index.iter() {
            let mut bound = 0;
            let satisfiable = route.param_names().all(|name| {
                bound += 1;
                params.get(name).is_some_and(|v| !v.is_empty())
            });
            if !satisfiable {
                continue;
            }
            if bound > best_count {
                best = Some(route);
                best_count = bound;
            }
        }
        best
    }

    fn build_explicit(&self, selected: &ParamValue, params: &Params) -> RouterResult<String> {
        let Some(pattern) = selected.as_raw() else {
            tracing::debug!("Explicit route selector holds a record");
            return Err(RouterError::UnboundRecord(RESERVED_PARAM.to_string()));
        };
        let segments = tokenize(pattern);
        if segments
            .iter()
            .filter_map(SegmentToken::param_name)
            .any(|name| name == RESERVED_PARAM)
        {
            return Err(RouterError::ReservedParam);
        }
        self.substitute(&segments, params, true)
    }

    fn substitute(&self, segments: &[SegmentToken], params: &Params, explicit: bool) -> RouterResult<String> {
        let mut parts = Vec::with_capacity(segments.len());
        for token in segments {
            match token {
                SegmentToken::Literal(literal) => parts.push(literal.clone()),
                SegmentToken::Param(name) => {
                    let value = params.get(name).filter(|v| !v.is_empty());
                    let Some(value) = value else {
                        debug_assert!(explicit, "best route must be satisfiable");
                        return Err(RouterError::MissingParam(name.clone()));
                    };
                    parts.push(self.render(name, value)?);
                }
            }
        }
        let separator = SEPARATOR.to_string();
        Ok(format!("{separator}{}", parts.join(separator.as_str())))
    }

    fn render(&self, name: &str, value: &ParamValue) -> RouterResult<String> {
        match (value, self.fields.get(name)) {
            (ParamValue::Raw(raw), _) => Ok(raw.clone()),
            (ParamValue::Record(record), Some(field)) => {
                record.field_text(field).ok_or_else(|| RouterError::MissingField {
                    param: name.to_string(),
                    field: field.to_string(),
                })
            }
            (ParamValue::Record(_), None) => Err(RouterError::UnboundRecord(name.to_string())),
        }
    }
}

fn describe(params: &Params) -> String {
    let names: Vec<_> = params.keys().map(String::as_str).collect();
    format!("params [{}]", names.join(", "))
}
