//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (params reference existing models)
//! - Reject the reserved `route` name in parameters and patterns
//! - Detect duplicate and malformed route patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::fields::RESERVED_PARAM;
use crate::routing::params::BuiltinPredicate;
use crate::routing::segment::{split_path, PARAM_SIGIL};

/// A semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`route` is reserved and cannot be used as a parameter name")]
    ReservedParamName,

    #[error("parameter `{0}` is defined more than once")]
    DuplicateParam(String),

    #[error("parameter `{param}` uses unknown predicate `{predicate}`")]
    UnknownPredicate { param: String, predicate: String },

    #[error("parameter `{param}` references undefined model `{model}`")]
    UnknownModel { param: String, model: String },

    #[error("model `{0}` is defined more than once")]
    DuplicateModel(String),

    #[error("route `{0}` duplicates an earlier route")]
    DuplicateRoute(String),

    #[error("route `{0}` has a parameter segment without a name")]
    EmptyParamName(String),

    #[error("route `{0}` binds the reserved `route` parameter")]
    ReservedSegment(String),

    #[error("route `{pattern}` binds parameter `{param}` more than once")]
    RepeatedParam { pattern: String, param: String },

    #[error("route `{0}` needs both a handler and an action")]
    EmptyTarget(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut models = HashSet::new();
    for model in &config.models {
        if !models.insert(model.name.as_str()) {
            errors.push(ValidationError::DuplicateModel(model.name.clone()));
        }
    }

    let mut params = HashSet::new();
    for param in &config.params {
        if param.name == RESERVED_PARAM {
            errors.push(ValidationError::ReservedParamName);
        }
        if !params.insert(param.name.as_str()) {
            errors.push(ValidationError::DuplicateParam(param.name.clone()));
        }
        if let Some(predicate) = &param.predicate {
            if BuiltinPredicate::from_name(predicate).is_none() {
                errors.push(ValidationError::UnknownPredicate {
                    param: param.name.clone(),
                    predicate: predicate.clone(),
                });
            }
        }
        if let Some(model) = &param.model {
            if !models.contains(model.as_str()) {
                errors.push(ValidationError::UnknownModel {
                    param: param.name.clone(),
                    model: model.clone(),
                });
            }
        }
    }

    let mut shapes = HashSet::new();
    for route in &config.routes {
        let segments = split_path(&route.pattern);
        if !shapes.insert(segments.clone()) {
            errors.push(ValidationError::DuplicateRoute(route.pattern.clone()));
        }
        if route.handler.trim().is_empty() || route.action.trim().is_empty() {
            errors.push(ValidationError::EmptyTarget(route.pattern.clone()));
        }

        let mut bound = HashSet::new();
        for segment in segments {
            let Some(name) = segment.strip_prefix(PARAM_SIGIL) else {
                continue;
            };
            if name.is_empty() {
                errors.push(ValidationError::EmptyParamName(route.pattern.clone()));
            } else if name == RESERVED_PARAM {
                errors.push(ValidationError::ReservedSegment(route.pattern.clone()));
            } else if !bound.insert(name) {
                errors.push(ValidationError::RepeatedParam {
                    pattern: route.pattern.clone(),
                    param: name.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ModelConfig, ParamConfig, RouteConfig};

    fn param(name: &str, predicate: Option<&str>, model: Option<&str>) -> ParamConfig {
        ParamConfig {
            name: name.into(),
            predicate: predicate.map(Into::into),
            model: model.map(Into::into),
            field: None,
        }
    }

    fn route(pattern: &str) -> RouteConfig {
        RouteConfig {
            pattern: pattern.into(),
            handler: "pages".into(),
            action: "show".into(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = RouterConfig {
            params: vec![param("id", Some("int"), None), param("post", None, Some("post"))],
            routes: vec![route("/posts/:id"), route("/p/:post")],
            models: vec![ModelConfig {
                name: "post".into(),
                url_field: true,
                records: Vec::new(),
            }],
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = RouterConfig {
            params: vec![
                param("route", None, None),
                param("id", Some("regex"), None),
                param("id", None, None),
                param("post", None, Some("post")),
            ],
            routes: vec![route("/a/:x/:x"), route("a//:x/:x/"), route("/b/:"), RouteConfig {
                pattern: "/c".into(),
                handler: String::new(),
                action: "index".into(),
            }],
            ..Default::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ReservedParamName));
        assert!(errors.contains(&ValidationError::UnknownPredicate {
            param: "id".into(),
            predicate: "regex".into(),
        }));
        assert!(errors.contains(&ValidationError::DuplicateParam("id".into())));
        assert!(errors.contains(&ValidationError::UnknownModel {
            param: "post".into(),
            model: "post".into(),
        }));
        assert!(errors.contains(&ValidationError::DuplicateRoute("a//:x/:x/".into())));
        assert!(errors.contains(&ValidationError::RepeatedParam {
            pattern: "/a/:x/:x".into(),
            param: "x".into(),
        }));
        assert!(errors.contains(&ValidationError::EmptyParamName("/b/:".into())));
        assert!(errors.contains(&ValidationError::EmptyTarget("/c".into())));
    }

    #[test]
    fn test_reserved_segment_in_pattern() {
        let config = RouterConfig {
            routes: vec![route("/r/:route")],
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ReservedSegment("/r/:route".into())]);
    }
}
