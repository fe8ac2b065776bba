//! Handler dispatch boundary.
//!
//! # Data Flow
//! ```text
//! RouteMatch (target.handler, target.action, params)
//!     → HandlerRegistry::instantiate(target.handler)
//!     → Handler::set_params(params)
//!     → Handler::invoke(target.action)
//!     → handler output (opaque JSON value)
//! ```
//!
//! # Design Decisions
//! - Handlers are constructed from an explicit id → constructor registry
//! - What a handler does with an action is its own business

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::routing::error::{RouterError, RouterResult};
use crate::routing::params::Params;
use crate::routing::table::Target;

/// Errors raised by handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler does not implement the requested action.
    #[error("handler has no action `{0}`")]
    UnknownAction(String),

    /// The action ran and failed.
    #[error("action `{action}` failed: {reason}")]
    Failed { action: String, reason: String },
}

/// A dispatch target.
pub trait Handler {
    /// Receive the parameters bound by the last match.
    fn set_params(&mut self, params: &Params);

    /// Run `action`.
    fn invoke(&mut self, action: &str) -> Result<serde_json::Value, HandlerError>;
}

/// Constructor for a handler.
pub type HandlerFactory = Box<dyn Fn() -> Box<dyn Handler> + Send + Sync>;

/// Handler constructors keyed by handler id.
#[derive(Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor used for routes targeting `id`.
    pub fn register<F, H>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: Handler + 'static,
    {
        self.factories
            .insert(id.into(), Box::new(move || Box::new(factory()) as Box<dyn Handler>));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Construct the handler for `target`.
    pub fn instantiate(&self, target: &Target) -> RouterResult<Box<dyn Handler>> {
        let factory = self
            .factories
            .get(&target.handler)
            .ok_or_else(|| RouterError::UnknownHandler(target.handler.clone()))?;
        Ok(factory())
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.factories.keys().collect();
        ids.sort();
        f.debug_struct("HandlerRegistry").field("handlers", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::params::ParamValue;
    use serde_json::json;

    #[derive(Default)]
    struct Greeter {
        name: Option<String>,
    }

    impl Handler for Greeter {
        fn set_params(&mut self, params: &Params) {
            self.name = params.get("name").and_then(ParamValue::as_raw).map(str::to_string);
        }

        fn invoke(&mut self, action: &str) -> Result<serde_json::Value, HandlerError> {
            match action {
                "hello" => Ok(json!({ "greeting": format!("hello {}", self.name.as_deref().unwrap_or("?")) })),
                other => Err(HandlerError::UnknownAction(other.to_string())),
            }
        }
    }

    #[test]
    fn test_instantiate_and_invoke() {
        let mut registry = HandlerRegistry::new();
        registry.register("greeter", Greeter::default);
        assert!(registry.contains("greeter"));

        let mut handler = registry.instantiate(&Target::new("greeter", "hello")).unwrap();
        let params = Params::from([("name".to_string(), ParamValue::from("ada"))]);
        handler.set_params(&params);
        assert_eq!(handler.invoke("hello").unwrap(), json!({ "greeting": "hello ada" }));
        assert!(matches!(handler.invoke("bye"), Err(HandlerError::UnknownAction(_))));
    }

    #[test]
    fn test_unknown_handler() {
        let registry = HandlerRegistry::new();
        let err = registry.instantiate(&Target::new("missing", "index")).err().unwrap();
        assert!(matches!(err, RouterError::UnknownHandler(id) if id == "missing"));
    }
}
