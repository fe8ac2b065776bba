//! Route registration, compilation and lookup.
//!
//! # Responsibilities
//! - Collect parameter and route registrations
//! - Build the segment-count index and field bindings on demand
//! - Match paths, build URLs and dispatch to handlers
//!
//! # Design Decisions
//! - `CompiledRouter` is an immutable snapshot, shareable across threads
//! - `Router` memoizes its snapshot parts and drops the affected part on
//!   registration (routes → index, params → field bindings)
//! - The last successful match is request-scoped state on `Router` only

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::RouterConfig;
use crate::handler::{Handler, HandlerRegistry};
use crate::observability::metrics;
use crate::routing::error::{RouterError, RouterResult};
use crate::routing::fields::FieldBindings;
use crate::routing::index::RouteIndex;
use crate::routing::matcher::{Matcher, RouteMatch};
use crate::routing::model::{MemoryModel, Model, Record};
use crate::routing::params::{BuiltinPredicate, ParamAttributes, ParamValue, ParameterRegistry, Params};
use crate::routing::reverse::ReverseResolver;
use crate::routing::table::{RouteTable, Target};

/// Immutable, fully built routing state.
#[derive(Debug, Clone)]
pub struct CompiledRouter {
    index: Arc<RouteIndex>,
    params: Arc<ParameterRegistry>,
    fields: Arc<FieldBindings>,
}

impl CompiledRouter {
    fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.index, &self.params, &self.fields)
    }

    fn resolver(&self) -> ReverseResolver<'_> {
        ReverseResolver::new(&self.index, &self.fields)
    }

    /// First route, in registration order, matching `path`.
    pub fn match_path(&self, path: &str) -> RouterResult<RouteMatch> {
        self.matcher().find(path)
    }

    /// Path for the route best satisfied by `params`.
    pub fn build_url(&self, params: &Params) -> RouterResult<String> {
        self.resolver().build_url(params)
    }

    /// Evaluate the constraints of parameter `name` against `value`.
    pub fn test_param(&self, name: &str, value: &str) -> RouterResult<Option<ParamValue>> {
        self.matcher().test_param(name, value)
    }

    /// Record of `param`'s model identified by `value`.
    pub fn resolve_model(&self, param: &str, value: &str) -> RouterResult<Option<Record>> {
        self.matcher().resolve_model(param, value)
    }

    pub fn index(&self) -> &RouteIndex {
        &self.index
    }

    pub fn fields(&self) -> &FieldBindings {
        &self.fields
    }
}

/// Mutable routing table with lazily built lookup structures.
#[derive(Debug, Default)]
pub struct Router {
    params: Arc<ParameterRegistry>,
    routes: RouteTable,
    index: Option<Arc<RouteIndex>>,
    fields: Option<Arc<FieldBindings>>,
    last_match: Option<RouteMatch>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router from a validated configuration.
    pub fn from_config(config: &RouterConfig) -> RouterResult<Self> {
        let models: HashMap<&str, Arc<dyn Model>> = config
            .models
            .iter()
            .map(|m| {
                let mut model = MemoryModel::new(m.name.clone(), m.records.clone());
                if m.url_field {
                    model = model.with_url_field();
                }
                (m.name.as_str(), Arc::new(model) as Arc<dyn Model>)
            })
            .collect();

        let mut router = Router::new();
        for param in &config.params {
            let mut attributes = ParamAttributes::new();
            if let Some(name) = &param.predicate {
                let predicate = BuiltinPredicate::from_name(name).ok_or_else(|| {
                    RouterError::UnknownPredicate {
                        param: param.name.clone(),
                        predicate: name.clone(),
                    }
                })?;
                attributes = attributes.matching(move |value| predicate.matches(value));
            }
            if let Some(name) = &param.model {
                let model = models.get(name.as_str()).cloned().ok_or_else(|| RouterError::UnknownModel {
                    param: param.name.clone(),
                    model: name.clone(),
                })?;
                attributes = attributes.model(model);
            }
            if let Some(field) = &param.field {
                attributes = attributes.field(field.clone());
            }
            router.register_param(param.name.clone(), attributes);
        }

        for route in &config.routes {
            router.register_route(route.pattern.clone(), route.handler.clone(), route.action.clone());
        }

        tracing::info!(
            routes = router.routes.len(),
            params = router.params.len(),
            models = models.len(),
            "Router built from configuration"
        );
        Ok(router)
    }

    /// Register (or replace) a named parameter.
    pub fn register_param(&mut self, name: impl Into<String>, attributes: ParamAttributes) {
        let name = name.into();
        tracing::debug!(param = %name, attributes = ?attributes, "Registering parameter");
        Arc::make_mut(&mut self.params).insert(name, attributes);
        self.fields = None;
    }

    /// Register (or retarget) a route pattern.
    pub fn register_route(
        &mut self,
        pattern: impl Into<String>,
        handler: impl Into<String>,
        action: impl Into<String>,
    ) {
        let pattern = pattern.into();
        let target = Target::new(handler, action);
        tracing::debug!(pattern = %pattern, handler = %target.handler, action = %target.action, "Registering route");
        self.routes.insert(pattern, target);
        self.index = None;
    }

    /// True when neither the index nor the field bindings need rebuilding.
    pub fn is_built(&self) -> bool {
        self.index.is_some() && self.fields.is_some()
    }

    /// Rebuild whatever registration invalidated and return the snapshot.
    pub fn ensure_built(&mut self) -> RouterResult<CompiledRouter> {
        if self.index.is_none() {
            self.index = Some(Arc::new(build_index(&self.routes)?));
        }
        if self.fields.is_none() {
            self.fields = Some(Arc::new(FieldBindings::build(&self.params)?));
        }
        self.compile()
    }

    /// Snapshot of the current registrations, reusing built parts.
    pub fn compile(&self) -> RouterResult<CompiledRouter> {
        let index = match &self.index {
            Some(index) => Arc::clone(index),
            None => Arc::new(build_index(&self.routes)?),
        };
        let fields = match &self.fields {
            Some(fields) => Arc::clone(fields),
            None => Arc::new(FieldBindings::build(&self.params)?),
        };
        Ok(CompiledRouter {
            index,
            params: Arc::clone(&self.params),
            fields,
        })
    }

    /// Match `path`, remembering the result for [`Router::dispatch`].
    ///
    /// A failed match leaves the previous result in place.
    pub fn match_path(&mut self, path: &str) -> RouterResult<RouteMatch> {
        let matched = self.ensure_built()?.match_path(path)?;
        self.last_match = Some(matched.clone());
        Ok(matched)
    }

    /// Result of the most recent successful match.
    pub fn last_match(&self) -> Option<&RouteMatch> {
        self.last_match.as_ref()
    }

    /// Push the last match's params into `handler` and run its action.
    pub fn dispatch(&self, handler: &mut dyn Handler) -> RouterResult<serde_json::Value> {
        let matched = self.last_match.as_ref().ok_or(RouterError::NoMatch)?;
        handler.set_params(&matched.params);
        Ok(handler.invoke(&matched.target.action)?)
    }

    /// Match `path`, construct its handler from `handlers` and dispatch.
    pub fn handle(&mut self, path: &str, handlers: &HandlerRegistry) -> RouterResult<serde_json::Value> {
        let matched = self.match_path(path)?;
        let mut handler = handlers.instantiate(&matched.target)?;
        self.dispatch(handler.as_mut())
    }

    pub fn build_url(&mut self, params: &Params) -> RouterResult<String> {
        self.ensure_built()?.build_url(params)
    }

    pub fn resolve_model(&mut self, param: &str, value: &str) -> RouterResult<Option<Record>> {
        self.ensure_built()?.resolve_model(param, value)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn params(&self) -> &ParameterRegistry {
        &self.params
    }
}

fn build_index(routes: &RouteTable) -> RouterResult<RouteIndex> {
    let index = RouteIndex::build(routes)?;
    tracing::debug!(routes = index.len(), "Route index rebuilt");
    metrics::record_index_rebuild(index.len());
    Ok(index)
}
