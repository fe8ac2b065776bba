//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path:
//!     "/posts/hello"
//!     → segment.rs (split, drop empty segments)
//!     → index.rs (bucket by segment count)
//!     → matcher.rs (first route whose literals and params all match)
//!     → RouteMatch { target, params } or NotFound
//!
//! Outgoing URL:
//!     Params { post: <record> }
//!     → reverse.rs (route binding the most supplied params)
//!     → fields.rs (project bound field off records)
//!     → "/posts/hello"
//!
//! Registration:
//!     register_param / register_route
//!     → drop stale index / field bindings
//!     → rebuilt on next use, or compiled into an immutable CompiledRouter
//! ```
//!
//! # Design Decisions
//! - Forward matching is first-match; reverse resolution is best-match
//! - Reverse resolution checks presence only, never constraints
//! - Compiled snapshots are immutable and shared via Arc / ArcSwap

pub mod error;
pub mod fields;
pub mod index;
pub mod matcher;
pub mod model;
pub mod params;
pub mod reverse;
pub mod router;
pub mod segment;
pub mod store;
pub mod table;

pub use error::{RouterError, RouterResult};
pub use matcher::RouteMatch;
pub use model::{Filter, MemoryModel, Model, ModelError, Record};
pub use params::{ParamAttributes, ParamValue, Params};
pub use router::{CompiledRouter, Router};
pub use store::RouterStore;
pub use table::Target;
