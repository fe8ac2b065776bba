//! Segment-count index over the route table.
//!
//! # Responsibilities
//! - Tokenize every registered pattern once
//! - Group routes by segment count for O(1) bucket lookup
//! - Reject patterns binding the reserved `route` name
//!
//! # Design Decisions
//! - Built as an immutable value; the owning `Router` drops it on change
//! - Buckets iterate in ascending segment count, routes in registration order

use std::collections::BTreeMap;

use crate::routing::error::{RouterError, RouterResult};
use crate::routing::fields::RESERVED_PARAM;
use crate::routing::segment::{tokenize, SegmentToken};
use crate::routing::table::{RouteTable, Target};

/// A route with its pattern pre-split into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRoute {
    pub pattern: String,
    pub segments: Vec<SegmentToken>,
    pub target: Target,
}

impl IndexedRoute {
    pub fn new(pattern: impl Into<String>, target: Target) -> Self {
        let pattern = pattern.into();
        Self {
            segments: tokenize(&pattern),
            pattern,
            target,
        }
    }

    /// Names of the parameters this route binds, in segment order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(SegmentToken::param_name)
    }

    pub fn param_count(&self) -> usize {
        self.param_names().count()
    }
}

/// Routes grouped by segment count.
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    buckets: BTreeMap<usize, Vec<IndexedRoute>>,
}

impl RouteIndex {
    pub fn build(table: &RouteTable) -> RouterResult<Self> {
        let mut buckets: BTreeMap<usize, Vec<IndexedRoute>> = BTreeMap::new();
        for def in table.iter() {
            let route = IndexedRoute::new(def.pattern.clone(), def.target.clone());
            if route.param_names().any(|name| name == RESERVED_PARAM) {
                tracing::error!(pattern = %route.pattern, "Route pattern binds the reserved parameter name");
                return Err(RouterError::ReservedParam);
            }
            buckets.entry(route.segments.len()).or_default().push(route);
        }
        Ok(Self { buckets })
    }

    /// Routes with exactly `segment_count` segments.
    pub fn bucket(&self, segment_count: usize) -> Option<&[IndexedRoute]> {
        self.buckets.get(&segment_count).map(Vec::as_slice)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (usize, &[IndexedRoute])> {
        self.buckets.iter().map(|(count, routes)| (*count, routes.as_slice()))
    }

    /// Every route, by ascending segment count then registration order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedRoute> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
