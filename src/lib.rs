//! Segment-count URL router with model-backed parameters and reverse URL building.

pub mod config;
pub mod handler;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use handler::{Handler, HandlerRegistry};
pub use routing::{CompiledRouter, RouteMatch, Router, RouterError};
