//! Raw route registrations.

use serde::{Deserialize, Serialize};

/// The handler and action a route dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Handler identifier, resolved through a `HandlerRegistry`.
    pub handler: String,
    /// Action invoked on the handler.
    pub action: String,
}

impl Target {
    pub fn new(handler: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            action: action.into(),
        }
    }
}

/// A registered pattern and its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub pattern: String,
    pub target: Target,
}

/// Route definitions in registration order, keyed by pattern.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern.
    ///
    /// Re-registering an existing pattern replaces its target but keeps the
    /// position it was first registered at.
    pub fn insert(&mut self, pattern: impl Into<String>, target: Target) {
        let pattern = pattern.into();
        match self.routes.iter_mut().find(|r| r.pattern == pattern) {
            Some(existing) => existing.target = target,
            None => self.routes.push(RouteDefinition { pattern, target }),
        }
    }

    pub fn get(&self, pattern: &str) -> Option<&RouteDefinition> {
        self.routes.iter().find(|r| r.pattern == pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reregistration_keeps_position() {
        let mut table = RouteTable::new();
        table.insert("/a", Target::new("home", "index"));
        table.insert("/b", Target::new("home", "about"));
        table.insert("/a", Target::new("pages", "show"));

        let patterns: Vec<_> = table.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["/a", "/b"]);
        assert_eq!(table.get("/a").unwrap().target, Target::new("pages", "show"));
        assert_eq!(table.len(), 2);
    }
}
