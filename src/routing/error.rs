//! Router error definitions.

use thiserror::Error;

use crate::handler::HandlerError;
use crate::routing::model::ModelError;

/// Errors surfaced by registration, matching, URL building and dispatch.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No route matched the path, or no route is satisfiable by the params.
    #[error("no route found for `{0}`")]
    NotFound(String),

    /// A parameter uses the name reserved for explicit route selection.
    #[error("`route` is reserved and cannot be used as a parameter name")]
    ReservedParam,

    /// A configured predicate name does not refer to a built-in predicate.
    #[error("parameter `{param}` uses unknown predicate `{predicate}`")]
    UnknownPredicate { param: String, predicate: String },

    /// A configured parameter refers to a model that was never defined.
    #[error("parameter `{param}` is bound to unknown model `{model}`")]
    UnknownModel { param: String, model: String },

    /// The matched target names a handler that has no constructor.
    #[error("no handler registered as `{0}`")]
    UnknownHandler(String),

    /// An explicitly selected pattern references a parameter with no value.
    #[error("missing value for parameter `{0}`")]
    MissingParam(String),

    /// A bound record does not carry the field its parameter projects.
    #[error("parameter `{param}` record has no usable `{field}` field")]
    MissingField { param: String, field: String },

    /// A record was supplied for a parameter with no bound field.
    #[error("parameter `{0}` holds a record but has no bound field")]
    UnboundRecord(String),

    /// `dispatch` was called before any path matched.
    #[error("no matched route to dispatch")]
    NoMatch,

    /// The backing model failed; its error is passed through as the source.
    #[error("model lookup for parameter `{param}` failed")]
    Model {
        param: String,
        #[source]
        source: ModelError,
    },

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl RouterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouterError::NotFound(_))
    }
}

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;
